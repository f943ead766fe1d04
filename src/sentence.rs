//! # Sentence Value Object
//!
//! [`Sentence`] owns the fields of one decoded or programmatically built
//! sentence. Fields are addressed by index; the number of fields is fixed at
//! construction. Mutations happen in place and the checksum is recomputed
//! whenever the sentence is serialized.

use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{
    Delimiter, Error, ParseOptions, Result, checksum, format_checksum,
    field::{Converter, is_field_char},
    frame::{self, Frame},
};

fn identifier<const N: usize>(text: &str, min: usize) -> Option<heapless::String<N>> {
    if text.len() < min || !text.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()) {
        return None;
    }

    let mut id = heapless::String::new();
    id.push_str(text).ok()?;
    Some(id)
}

/// Two or three character code of the device class, e.g. `GP` for GPS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TalkerId(heapless::String<3>);

impl TalkerId {
    pub fn new(id: &str) -> Result<Self> {
        identifier(id, 2)
            .map(Self)
            .ok_or(Error::InvalidArgument("talker id must be 2 or 3 uppercase alphanumerics"))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Three character code of the sentence type, e.g. `RMC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SentenceId(heapless::String<3>);

impl SentenceId {
    pub fn new(id: &str) -> Result<Self> {
        identifier(id, 3)
            .map(Self)
            .ok_or(Error::InvalidArgument("sentence id must be 3 uppercase alphanumerics"))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TalkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SentenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
macro_rules! impl_serde_id {
    ($($id:ident),*) => {$(
        impl Serialize for $id {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $id {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let id = String::deserialize(deserializer)?;
                Self::new(&id).map_err(de::Error::custom)
            }
        }
    )*};
}

#[cfg(feature = "serde")]
impl_serde_id!(TalkerId, SentenceId);

fn check_field(text: &str) -> Result<()> {
    if !text.chars().all(is_field_char) {
        return Err(Error::InvalidArgument(
            "field contains characters reserved by the wire format",
        ));
    }
    Ok(())
}

/// One NMEA 0183 sentence: address plus a fixed number of text fields.
///
/// # Examples
///
/// ```rust
/// use nmea0183_sentence::{Sentence, field::Decimal};
///
/// let mut sentence: Sentence = "$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K,A*25".parse().unwrap();
/// assert_eq!(sentence.sentence_id().as_str(), "VTG");
/// assert_eq!(sentence.get(0, &Decimal::new(3, 1)), Ok(Some(54.7)));
///
/// sentence.set(0, &Decimal::new(3, 1), &90.0).unwrap();
/// assert_eq!(sentence.to_wire_string(), "$GPVTG,090.0,T,034.4,M,005.5,N,010.2,K,A*2A");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentence {
    delimiter: Delimiter,
    talker: TalkerId,
    sentence_id: SentenceId,
    fields: Vec<String>,
}

impl Sentence {
    /// Creates a sentence with `field_count` empty fields.
    pub fn new(
        delimiter: Delimiter,
        talker: TalkerId,
        sentence_id: SentenceId,
        field_count: usize,
    ) -> Self {
        Self {
            delimiter,
            talker,
            sentence_id,
            fields: vec![String::new(); field_count],
        }
    }

    /// Decodes a line with the default [`ParseOptions`].
    pub fn parse(line: &str) -> Result<Self> {
        Self::parse_with(line, &ParseOptions::default())
    }

    pub fn parse_with(line: &str, options: &ParseOptions) -> Result<Self> {
        frame::split(line, options)?.try_into()
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn talker_id(&self) -> &TalkerId {
        &self.talker
    }

    pub fn set_talker_id(&mut self, talker: TalkerId) {
        self.talker = talker;
    }

    pub fn sentence_id(&self) -> &SentenceId {
        &self.sentence_id
    }

    /// Number of fields, fixed for the lifetime of the sentence.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Raw text of the field at `index`, empty when the data is not available.
    pub fn field(&self, index: usize) -> Result<&str> {
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or(self.out_of_range(index))
    }

    /// Replaces the raw text of the field at `index`.
    ///
    /// The text must not contain `,`, `*`, `$`, `!`, control or non-ASCII
    /// characters; other fields are never affected.
    pub fn set_field(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.set_fields([(index, text.into())])
    }

    /// Replaces several fields at once.
    ///
    /// Either all fields are written or, on error, none of them.
    pub fn set_fields<const N: usize>(&mut self, updates: [(usize, String); N]) -> Result<()> {
        for (index, text) in &updates {
            if *index >= self.fields.len() {
                return Err(self.out_of_range(*index));
            }
            check_field(text)?;
        }

        for (index, text) in updates {
            self.fields[index] = text;
        }
        Ok(())
    }

    /// Empties the field at `index`, marking its data as not available.
    pub fn clear_field(&mut self, index: usize) -> Result<()> {
        self.set_field(index, String::new())
    }

    /// Reads the field at `index` through `converter`.
    pub fn get<C: Converter>(&self, index: usize, converter: &C) -> Result<Option<C::Value>> {
        converter.parse(self.field(index)?)
    }

    /// Writes `value` into the field at `index` through `converter`.
    pub fn set<C: Converter>(&mut self, index: usize, converter: &C, value: &C::Value) -> Result<()> {
        if index >= self.fields.len() {
            return Err(self.out_of_range(index));
        }

        let text = converter.format(value)?;
        self.set_field(index, text)
    }

    /// Checksum of the current content.
    pub fn checksum(&self) -> u8 {
        checksum(&self.body())
    }

    /// Reassembles the sentence as `$<talker><id>,<fields>*<CS>`.
    pub fn to_wire_string(&self) -> String {
        self.to_string()
    }

    fn body(&self) -> String {
        let mut body = format!("{}{}", self.talker, self.sentence_id);
        for field in &self.fields {
            body.push(',');
            body.push_str(field);
        }
        body
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            len: self.fields.len(),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Sentence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Parts {
            delimiter: Delimiter,
            talker: TalkerId,
            sentence_id: SentenceId,
            fields: Vec<String>,
        }

        let Parts {
            delimiter,
            talker,
            sentence_id,
            fields,
        } = Parts::deserialize(deserializer)?;
        for field in &fields {
            check_field(field).map_err(de::Error::custom)?;
        }

        Ok(Self {
            delimiter,
            talker,
            sentence_id,
            fields,
        })
    }
}

impl TryFrom<Frame<'_>> for Sentence {
    type Error = Error;

    fn try_from(frame: Frame<'_>) -> Result<Self> {
        Ok(Self {
            delimiter: frame.delimiter,
            talker: TalkerId::new(frame.talker)?,
            sentence_id: SentenceId::new(frame.sentence_id)?,
            fields: frame.fields.into_iter().map(str::to_string).collect(),
        })
    }
}

impl FromStr for Sentence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.body();
        write!(
            f,
            "{}{body}*{}",
            self.delimiter.as_char(),
            format_checksum(checksum(&body))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GGA: &str = "$GPGGA,092725.00,4717.113,N,00833.915,E,1,08,1.0,499.7,M,48.0,M,,*62";

    #[test]
    fn test_identifiers() {
        assert_eq!(TalkerId::new("GP").unwrap().as_str(), "GP");
        assert_eq!(TalkerId::new("GPS").unwrap().as_str(), "GPS");
        assert!(TalkerId::new("G").is_err());
        assert!(TalkerId::new("GPSS").is_err());
        assert!(TalkerId::new("gp").is_err());

        assert_eq!(SentenceId::new("RMC").unwrap().to_string(), "RMC");
        assert!(SentenceId::new("RM").is_err());
        assert!(SentenceId::new("RMCC").is_err());
    }

    #[test]
    fn test_new_template() {
        let sentence = Sentence::new(
            Delimiter::Parametric,
            TalkerId::new("GP").unwrap(),
            SentenceId::new("GLL").unwrap(),
            7,
        );

        assert_eq!(sentence.len(), 7);
        assert!(sentence.fields().all(str::is_empty));
        let expected = format!("$GPGLL,,,,,,,*{}", format_checksum(checksum("GPGLL,,,,,,,")));
        assert_eq!(sentence.to_wire_string(), expected);
    }

    #[test]
    fn test_round_trip() {
        let sentence = Sentence::parse(GGA).unwrap();
        assert_eq!(sentence.len(), 14);
        assert_eq!(sentence.field(12), Ok(""));
        assert_eq!(sentence.to_wire_string(), GGA);
    }

    #[test]
    fn test_field_access() {
        let mut sentence = Sentence::parse(GGA).unwrap();
        assert_eq!(sentence.field(0), Ok("092725.00"));
        assert_eq!(
            sentence.field(14),
            Err(Error::IndexOutOfRange { index: 14, len: 14 })
        );

        sentence.set_field(6, "2").unwrap();
        assert_eq!(sentence.field(6), Ok("2"));
        assert_eq!(sentence.field(5), Ok("E"));
        assert_eq!(sentence.field(7), Ok("08"));
        assert_eq!(
            sentence.set_field(20, "x"),
            Err(Error::IndexOutOfRange { index: 20, len: 14 })
        );

        sentence.clear_field(0).unwrap();
        assert_eq!(sentence.field(0), Ok(""));
        assert_eq!(sentence.len(), 14);
    }

    #[test]
    fn test_reserved_characters_are_rejected() {
        let mut sentence = Sentence::parse(GGA).unwrap();

        for text in ["1,2", "1*2", "$", "!", "\r\n", "é"] {
            assert!(
                matches!(sentence.set_field(1, text), Err(Error::InvalidArgument(_))),
                "Accepted {text:?}"
            );
        }
        assert_eq!(sentence.to_wire_string(), GGA);
    }

    #[test]
    fn test_set_fields_is_atomic() {
        let mut sentence = Sentence::parse(GGA).unwrap();

        let result = sentence.set_fields([(1, "0000.000".to_string()), (99, "N".to_string())]);
        assert_eq!(result, Err(Error::IndexOutOfRange { index: 99, len: 14 }));
        assert_eq!(sentence.field(1), Ok("4717.113"));
    }

    #[test]
    fn test_checksum_is_recomputed() {
        let mut sentence = Sentence::parse(GGA).unwrap();
        assert_eq!(sentence.checksum(), 0x62);

        sentence.set_field(8, "499.8").unwrap();
        let wire = sentence.to_wire_string();
        assert!(wire.contains(",499.8,"));
        assert!(crate::checksum::validate(&wire));
    }

    #[test]
    fn test_talker_id() {
        let mut sentence = Sentence::parse(GGA).unwrap();
        sentence.set_talker_id(TalkerId::new("GN").unwrap());
        assert!(sentence.to_wire_string().starts_with("$GNGGA,092725.00,"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let sentence = Sentence::parse(GGA).unwrap();
        let json = serde_json::to_string(&sentence).unwrap();
        assert!(json.contains(r#""talker":"GP","sentence_id":"GGA""#), "{json}");
        assert_eq!(serde_json::from_str::<Sentence>(&json).unwrap(), sentence);

        let bad_field = json.replace("499.7", "499,7");
        assert!(serde_json::from_str::<Sentence>(&bad_field).is_err());

        let bad_talker = json.replace(r#""talker":"GP""#, r#""talker":"gp""#);
        assert!(serde_json::from_str::<Sentence>(&bad_talker).is_err());

        assert!(serde_json::from_str::<TalkerId>("\"\"").is_err());
        assert!(serde_json::from_str::<SentenceId>("\"RM\"").is_err());
        assert_eq!(
            serde_json::from_str::<SentenceId>("\"RMC\"").unwrap(),
            SentenceId::new("RMC").unwrap()
        );
    }

    #[test]
    fn test_encapsulated_round_trip() {
        let line = "!AIVDM,1,1,,A,13aEOK?P00PD2wVMdLDRhgvL289?,0*26";
        let sentence: Sentence = line.parse().unwrap();
        assert_eq!(sentence.delimiter(), Delimiter::Encapsulated);
        assert_eq!(sentence.to_string(), line);
    }
}
