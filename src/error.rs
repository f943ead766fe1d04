//! # Error Types
//!
//! This module defines the error types used throughout the sentence engine.

use std::fmt;

/// Holds the result of the `nom` parsers backing the field converters.
///
/// It depends on the input type `I`, the output type `O`, and the error type `E`
/// (by default `nom::error::Error<I>`). Use it when implementing
/// [`Converter`](crate::field::Converter) for your own field types.
pub type IResult<I, O, E = nom::error::Error<I>> = nom::IResult<I, O, E>;

/// Result type returned by every fallible operation of this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Represents all possible errors that can occur while decoding, reading,
/// mutating or re-encoding a sentence.
///
/// A field that is merely empty is *not* an error: typed accessors report it
/// as `Ok(None)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The provided input contains non-ASCII characters.
    ///
    /// NMEA messages must be ASCII-only for proper parsing and checksum calculation.
    NonAscii,

    /// The sentence frame violates the wire format.
    MalformedFrame(FrameError),

    /// The checksum of the sentence was corrupt or incorrect.
    ///
    /// Contains both the expected checksum (calculated from the message content)
    /// and the actual checksum found in the message.
    ChecksumMismatch {
        /// The checksum calculated from the message content
        expected: u8,
        /// The checksum found in the message
        found: u8,
    },

    /// A non-empty field does not match the lexical shape of its converter.
    ///
    /// Contains the text of the offending field.
    InvalidField(String),

    /// A setter received a value outside of the domain it accepts.
    ///
    /// The sentence is left unchanged.
    InvalidArgument(&'static str),

    /// A field index beyond the fixed field count of the sentence.
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// The number of fields in the sentence
        len: usize,
    },

    /// A typed view was requested for a sentence of another type.
    ///
    /// Contains the sentence id that was found.
    UnrecognizedSentence(String),
}

/// Structural violations of the `$<address>,<fields>*<CS>` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// The line does not start with `$` or `!`.
    MissingSentinel,
    /// The line has no `*` checksum delimiter.
    MissingChecksum,
    /// The checksum is not exactly two hexadecimal digits.
    InvalidChecksum,
    /// The address is not 5 or 6 alphanumeric characters.
    InvalidAddress,
    /// The line ending does not match the configured [`LineEndingMode`](crate::LineEndingMode).
    LineEnding,
    /// The number of fields is outside the range expected for the sentence type.
    FieldCount {
        /// Smallest accepted field count
        min: usize,
        /// Largest accepted field count
        max: usize,
        /// Field count found in the sentence
        found: usize,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::MissingSentinel => write!(f, "sentence must start with '$' or '!'"),
            FrameError::MissingChecksum => write!(f, "missing '*' checksum delimiter"),
            FrameError::InvalidChecksum => write!(f, "checksum must be two hexadecimal digits"),
            FrameError::InvalidAddress => {
                write!(f, "talker and sentence id must be 5 or 6 alphanumeric characters")
            }
            FrameError::LineEnding => write!(f, "unexpected line ending"),
            FrameError::FieldCount { min, max, found } if min == max => {
                write!(f, "expected {min} fields, found {found}")
            }
            FrameError::FieldCount { min, max, found } => {
                write!(f, "expected {min} to {max} fields, found {found}")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NonAscii => write!(f, "sentence contains non-ASCII characters"),
            Error::MalformedFrame(e) => write!(f, "malformed sentence: {e}"),
            Error::ChecksumMismatch { expected, found } => write!(
                f,
                "checksum mismatch: calculated {expected:02X}, found {found:02X}"
            ),
            Error::InvalidField(value) => write!(f, "invalid field value {value:?}"),
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "field index {index} out of range for {len} fields")
            }
            Error::UnrecognizedSentence(id) => write!(f, "unexpected sentence type {id:?}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<FrameError> for Error {
    fn from(error: FrameError) -> Self {
        Error::MalformedFrame(error)
    }
}
