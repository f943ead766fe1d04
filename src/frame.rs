//! # Frame Splitter
//!
//! This module validates the sentence envelope `$<address>,<f0>,...,<fn>*<CS>`
//! and splits it into the talker id, the sentence id and the ordered field list.
//!
//! Splitting is configurable through [`ParseOptions`]:
//! - Checksum mismatches are rejected or tolerated ([`ChecksumMode`])
//! - A trailing CRLF is forbidden or required ([`LineEndingMode`])
//! - The number of fields may be restricted to the range a sentence type expects

use std::ops::RangeInclusive;

use nom::{
    Parser,
    bytes::complete::{tag, take_until, take_while_m_n},
    character::complete::{char, one_of},
    combinator::{all_consuming, opt},
    error::{ErrorKind, make_error},
    sequence::preceded,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{Error, FrameError, IResult, Result, checksum};

type NomErr<'a> = nom::Err<nom::error::Error<&'a str>>;

/// Defines how the splitter reacts to a checksum that does not match the body.
///
/// The `*CC` checksum itself is always required; this only controls whether a
/// wrong value is fatal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    /// A mismatching checksum fails with [`Error::ChecksumMismatch`].
    #[default]
    Strict,

    /// A mismatching checksum is logged and the sentence is accepted.
    ///
    /// Use this mode for devices known to emit incorrect checksums.
    Lenient,
}

/// Defines how the splitter should handle CRLF line endings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEndingMode {
    /// CRLF line ending is required and stripped before splitting.
    ///
    /// Use this mode when handing over raw lines read from a serial port or log file.
    Required,

    /// CRLF line ending is forbidden and must not be present.
    ///
    /// This is the default: callers strip line terminators themselves.
    #[default]
    Forbidden,
}

/// Options controlling how a line is accepted by [`split`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_sentence::{ChecksumMode, LineEndingMode, ParseOptions};
///
/// let options = ParseOptions::new()
///     .checksum(ChecksumMode::Lenient)
///     .line_ending(LineEndingMode::Required)
///     .expected_fields(11..=12);
///
/// assert_eq!(options.checksum, ChecksumMode::Lenient);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reaction to a mismatching checksum
    pub checksum: ChecksumMode,
    /// Expected line terminator
    pub line_ending: LineEndingMode,
    /// Accepted number of fields, unrestricted when `None`
    pub expected_fields: Option<RangeInclusive<usize>>,
}

impl ParseOptions {
    /// Strict checksum, no line terminator, any number of fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how a mismatching checksum is handled.
    ///
    /// # Arguments
    ///
    /// * `mode` - [`ChecksumMode::Strict`] rejects the line,
    ///   [`ChecksumMode::Lenient`] logs a warning and accepts it
    pub fn checksum(mut self, mode: ChecksumMode) -> Self {
        self.checksum = mode;
        self
    }

    /// Sets whether the line must end with CRLF.
    ///
    /// # Arguments
    ///
    /// * `mode` - [`LineEndingMode::Required`] strips a mandatory `\r\n`,
    ///   [`LineEndingMode::Forbidden`] rejects any terminator
    pub fn line_ending(mut self, mode: LineEndingMode) -> Self {
        self.line_ending = mode;
        self
    }

    /// Restricts the number of fields a line may carry.
    ///
    /// A line outside of `range` fails with [`FrameError::FieldCount`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_sentence::{Error, FrameError, ParseOptions, Sentence};
    ///
    /// let options = ParseOptions::new().expected_fields(7..=7);
    /// assert!(Sentence::parse_with("$GPGLL,4916.45,N,12311.12,W,225444,A,*1D", &options).is_ok());
    ///
    /// let options = ParseOptions::new().expected_fields(8..=9);
    /// assert_eq!(
    ///     Sentence::parse_with("$GPGLL,4916.45,N,12311.12,W,225444,A,*1D", &options),
    ///     Err(Error::MalformedFrame(FrameError::FieldCount { min: 8, max: 9, found: 7 }))
    /// );
    /// ```
    pub fn expected_fields(mut self, range: RangeInclusive<usize>) -> Self {
        self.expected_fields = Some(range);
        self
    }
}

/// The character a sentence starts with.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `$` - parametric (data) sentence
    #[default]
    Parametric,
    /// `!` - encapsulated sentence, e.g. AIS
    Encapsulated,
}

impl Delimiter {
    /// The sentinel written in front of the address.
    ///
    /// ```rust
    /// use nmea0183_sentence::Delimiter;
    ///
    /// assert_eq!(Delimiter::Parametric.as_char(), '$');
    /// assert_eq!(Delimiter::Encapsulated.as_char(), '!');
    /// ```
    pub const fn as_char(self) -> char {
        match self {
            Delimiter::Parametric => '$',
            Delimiter::Encapsulated => '!',
        }
    }
}

/// A validated sentence envelope borrowing from the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    pub delimiter: Delimiter,
    /// Talker id, 2 or 3 characters
    pub talker: &'a str,
    /// Sentence id, 3 characters
    pub sentence_id: &'a str,
    /// Fields in wire order, empty strings for unavailable data
    pub fields: Vec<&'a str>,
    /// Checksum transmitted with the sentence
    pub checksum: u8,
}

/// Validates the envelope of `line` and splits it into its parts.
///
/// # Examples
///
/// ```rust
/// use nmea0183_sentence::{ParseOptions, frame};
///
/// let frame = frame::split("$GPGLL,4916.45,N,12311.12,W,225444,A,*1D", &ParseOptions::new()).unwrap();
/// assert_eq!(frame.talker, "GP");
/// assert_eq!(frame.sentence_id, "GLL");
/// assert_eq!(frame.fields, ["4916.45", "N", "12311.12", "W", "225444", "A", ""]);
/// ```
pub fn split<'a>(line: &'a str, options: &ParseOptions) -> Result<Frame<'a>> {
    let result = split_inner(line, options);

    match &result {
        Ok(frame) => trace!(
            talker = frame.talker,
            sentence_id = frame.sentence_id,
            fields = frame.fields.len(),
            "split sentence frame"
        ),
        Err(error) => debug!(%error, line, "rejected sentence frame"),
    }

    result
}

/// Returns `true` if `line` is a well-formed sentence with a valid checksum.
pub fn is_valid(line: &str) -> bool {
    split_inner(line, &ParseOptions::default()).is_ok()
}

fn split_inner<'a>(line: &'a str, options: &ParseOptions) -> Result<Frame<'a>> {
    let (line, ()) = crlf(options.line_ending)(line).map_err(|_| FrameError::LineEnding)?;

    if !line.is_ascii() {
        return Err(Error::NonAscii);
    }

    let (rest, sentinel) = one_of("$!")
        .parse(line)
        .map_err(|_: NomErr<'a>| FrameError::MissingSentinel)?;
    let delimiter = if sentinel == '!' {
        Delimiter::Encapsulated
    } else {
        Delimiter::Parametric
    };

    let (cc, body) = take_until("*")
        .parse(rest)
        .map_err(|_: NomErr<'a>| FrameError::MissingChecksum)?;
    let (_, cc) = all_consuming(preceded(
        char('*'),
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
    ))
    .parse(cc)
    .map_err(|_: NomErr<'a>| FrameError::InvalidChecksum)?;
    let found = u8::from_str_radix(cc, 16).map_err(|_| FrameError::InvalidChecksum)?;

    let (address, fields) = match body.split_once(',') {
        Some((address, fields)) => (address, fields.split(',').collect()),
        None => (body, Vec::new()),
    };

    let (_, address) = all_consuming(take_while_m_n(5, 6, |c: char| {
        c.is_ascii_uppercase() || c.is_ascii_digit()
    }))
    .parse(address)
    .map_err(|_: NomErr<'a>| FrameError::InvalidAddress)?;
    let (talker, sentence_id) = address.split_at(address.len() - 3);

    let expected = checksum(body);
    if expected != found {
        match options.checksum {
            ChecksumMode::Strict => return Err(Error::ChecksumMismatch { expected, found }),
            ChecksumMode::Lenient => warn!(
                expected,
                found, talker, sentence_id, "tolerating checksum mismatch"
            ),
        }
    }

    if let Some(range) = &options.expected_fields {
        if !range.contains(&fields.len()) {
            return Err(FrameError::FieldCount {
                min: *range.start(),
                max: *range.end(),
                found: fields.len(),
            }
            .into());
        }
    }

    Ok(Frame {
        delimiter,
        talker,
        sentence_id,
        fields,
        checksum: found,
    })
}

/// Parses CRLF line endings based on configuration.
///
/// On success the output input is the line without its terminator.
///
/// # Examples
///
/// ```rust
/// use nmea0183_sentence::{IResult, LineEndingMode, frame::crlf};
///
/// let result: IResult<_, _> = crlf(LineEndingMode::Required)("data\r\n");
/// assert_eq!(result, Ok(("data", ())));
///
/// let result: IResult<_, _> = crlf(LineEndingMode::Forbidden)("data");
/// assert_eq!(result, Ok(("data", ())));
/// ```
pub fn crlf<'a>(mode: LineEndingMode) -> impl Fn(&'a str) -> IResult<&'a str, ()> {
    move |i: &'a str| {
        let (terminator, data) = opt(take_until::<_, _, nom::error::Error<&'a str>>("\r\n")).parse(i)?;

        match (mode, data) {
            (LineEndingMode::Required, Some(data)) => {
                let (_, _) =
                    all_consuming(tag::<_, _, nom::error::Error<&'a str>>("\r\n")).parse(terminator)?;
                Ok((data, ()))
            }
            (LineEndingMode::Required, None) | (LineEndingMode::Forbidden, Some(_)) => {
                Err(nom::Err::Error(make_error(i, ErrorKind::CrLf)))
            }
            (LineEndingMode::Forbidden, None) => Ok((i, ())),
        }
    }
}
