//! # NMEA 0183 Sentence Engine
//!
//! This library decodes and re-encodes NMEA 0183 sentences with the format:
//! `$<talker><id>,D1,D2,...,Dn*CC`
//!
//! A raw line goes through three layers:
//! - [`frame`] validates the envelope and the checksum and splits the fields
//! - [`Sentence`] owns the fields and lets you read or replace them by index
//! - typed views such as [`Rmc`] map fields to values (position, time,
//!   date, status letters) through the converters in [`field`]
//!
//! Every typed read has three outcomes: `Ok(Some(value))`, `Ok(None)` when the
//! field is empty, and `Err(_)` when the field is malformed.
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_sentence::{Rmc, SentenceView, field::Position};
//!
//! let mut rmc = Rmc::parse("$GPRMC,120044,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*11")?;
//!
//! let position = rmc.position()?.expect("position is present");
//! assert!((position.latitude() - 60.1925).abs() < 1e-4);
//!
//! rmc.set_position(Position::new(61.0 + 1.111 / 60.0, 27.0 + 7.777 / 60.0)?)?;
//! assert!(rmc.to_wire_string().contains(",6101.111,N,02707.777,E,"));
//! # Ok::<(), nmea0183_sentence::Error>(())
//! ```

pub mod checksum;
pub mod error;
pub mod field;
pub mod frame;
mod sentence;
pub mod sentences;

pub use checksum::{checksum, format_checksum};
pub use error::{Error, FrameError, IResult, Result};
pub use frame::{ChecksumMode, Delimiter, LineEndingMode, ParseOptions};
pub use sentence::{Sentence, SentenceId, TalkerId};
pub use sentences::{Rmc, SentenceView};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
