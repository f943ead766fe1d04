//! # Sentence Views
//!
//! A view wraps a [`Sentence`] of one known type and exposes its fields as
//! typed accessors. Views are declared with [`sentence_view!`]: every table
//! row binds a field index to a converter and generates a getter and setter
//! pair. Accessors that span several fields are written by hand next to the
//! table.

use std::ops::RangeInclusive;

use crate::{
    Delimiter, Error, FrameError, ParseOptions, Result, Sentence, SentenceId, TalkerId,
    field::Converter,
};

pub mod rmc;

pub use rmc::Rmc;

/// Typed access to a sentence of one type.
pub trait SentenceView: Sized {
    /// Sentence id the view accepts, e.g. `RMC`.
    const SENTENCE_ID: &'static str;

    /// Accepted number of fields. Fields at or past the lower bound are
    /// optional and read as not available when missing.
    const FIELD_COUNT: RangeInclusive<usize>;

    /// Wraps a sentence whose id and field count were already checked.
    fn wrap(sentence: Sentence) -> Self;

    fn sentence(&self) -> &Sentence;

    fn sentence_mut(&mut self) -> &mut Sentence;

    fn into_sentence(self) -> Sentence;

    /// Creates an empty sentence with the maximum number of fields.
    fn new(talker: TalkerId) -> Result<Self> {
        let sentence_id = SentenceId::new(Self::SENTENCE_ID)?;
        Ok(Self::wrap(Sentence::new(
            Delimiter::Parametric,
            talker,
            sentence_id,
            *Self::FIELD_COUNT.end(),
        )))
    }

    /// Checks that `sentence` is of this type and has an accepted field count.
    fn from_sentence(sentence: Sentence) -> Result<Self> {
        if sentence.sentence_id().as_str() != Self::SENTENCE_ID {
            return Err(Error::UnrecognizedSentence(
                sentence.sentence_id().to_string(),
            ));
        }

        if !Self::FIELD_COUNT.contains(&sentence.len()) {
            return Err(FrameError::FieldCount {
                min: *Self::FIELD_COUNT.start(),
                max: *Self::FIELD_COUNT.end(),
                found: sentence.len(),
            }
            .into());
        }

        Ok(Self::wrap(sentence))
    }

    fn parse(line: &str) -> Result<Self> {
        Self::parse_with(line, &ParseOptions::default())
    }

    fn parse_with(line: &str, options: &ParseOptions) -> Result<Self> {
        Self::from_sentence(Sentence::parse_with(line, options)?)
    }

    fn to_wire_string(&self) -> String {
        self.sentence().to_wire_string()
    }

    /// Reads the field at `index`; missing optional fields are not available.
    fn read<C: Converter>(&self, index: usize, converter: &C) -> Result<Option<C::Value>> {
        let sentence = self.sentence();
        if index >= sentence.len() && index >= *Self::FIELD_COUNT.start() {
            return Ok(None);
        }
        debug_assert!(index < sentence.len(), "mandatory field {index} is missing");

        sentence.get(index, converter)
    }

    /// Writes the field at `index`.
    ///
    /// Sentences without an optional field cannot gain it, writing one fails
    /// with [`Error::InvalidArgument`].
    fn write<C: Converter>(&mut self, index: usize, converter: &C, value: &C::Value) -> Result<()> {
        debug_assert!(
            index < *Self::FIELD_COUNT.end(),
            "field {index} is not part of {}",
            Self::SENTENCE_ID
        );

        if index >= self.sentence().len() && index >= *Self::FIELD_COUNT.start() {
            return Err(Error::InvalidArgument(
                "sentence predates this optional field",
            ));
        }

        self.sentence_mut().set(index, converter, value)
    }
}

/// Declares a [`SentenceView`] from a table of `index => getter, setter: Type = converter` rows.
macro_rules! sentence_view {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($id:literal, $fields:expr) {
            $(
                $(#[$field_meta:meta])*
                $index:literal => $getter:ident, $setter:ident: $value:ty = $converter:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis struct $name {
            sentence: $crate::Sentence,
        }

        impl $crate::sentences::SentenceView for $name {
            const SENTENCE_ID: &'static str = $id;
            const FIELD_COUNT: ::std::ops::RangeInclusive<usize> = $fields;

            fn wrap(sentence: $crate::Sentence) -> Self {
                Self { sentence }
            }

            fn sentence(&self) -> &$crate::Sentence {
                &self.sentence
            }

            fn sentence_mut(&mut self) -> &mut $crate::Sentence {
                &mut self.sentence
            }

            fn into_sentence(self) -> $crate::Sentence {
                self.sentence
            }
        }

        impl $name {
            $(
                $(#[$field_meta])*
                pub fn $getter(&self) -> $crate::Result<Option<$value>> {
                    $crate::sentences::SentenceView::read(self, $index, &$converter)
                }

                #[doc = concat!("Sets the field read by [`", stringify!($getter), "`](Self::", stringify!($getter), ").")]
                pub fn $setter(&mut self, value: $value) -> $crate::Result<()> {
                    $crate::sentences::SentenceView::write(self, $index, &$converter, &value)
                }
            )*
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.sentence, f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::Error;

            fn from_str(s: &str) -> $crate::Result<Self> {
                <Self as $crate::sentences::SentenceView>::parse(s)
            }
        }

        impl TryFrom<$crate::Sentence> for $name {
            type Error = $crate::Error;

            fn try_from(sentence: $crate::Sentence) -> $crate::Result<Self> {
                <Self as $crate::sentences::SentenceView>::from_sentence(sentence)
            }
        }

        impl From<$name> for $crate::Sentence {
            fn from(view: $name) -> Self {
                view.sentence
            }
        }
    };
}

pub(crate) use sentence_view;
