//! # Field Converters
//!
//! Stateless, bidirectional converters between the raw text of one field and
//! a typed value. Every read has three outcomes:
//!
//! - `Ok(Some(value))` - the field holds a well-formed value
//! - `Ok(None)` - the field is empty, the data is not available
//! - `Err(Error::InvalidField(_))` - the field text does not have the expected shape
//!
//! Converters never coerce malformed text into a default value.

mod enums;
mod position;

pub use enums::{DataStatus, Direction, FieldLetter, GpsMode};
pub use position::{Axis, Position};

use std::marker::PhantomData;

use nom::{
    Finish, Parser,
    branch::alt,
    bytes::complete::take_while_m_n,
    character::complete::{anychar, char, digit0, digit1, one_of},
    combinator::{all_consuming, map_opt, map_res, opt, recognize},
    sequence::preceded,
};

use crate::{Error, IResult, Result};

/// A pair of functions converting one field's text to and from a typed value.
///
/// # Implementing for Custom Types
///
/// ```rust
/// use nmea0183_sentence::{Error, Result, field::Converter};
///
/// /// Satellite count, at most two digits
/// struct Satellites;
///
/// impl Converter for Satellites {
///     type Value = u8;
///
///     fn parse(&self, text: &str) -> Result<Option<u8>> {
///         if text.is_empty() {
///             return Ok(None);
///         }
///         text.parse()
///             .map(Some)
///             .map_err(|_| Error::InvalidField(text.to_string()))
///     }
///
///     fn format(&self, value: &u8) -> Result<String> {
///         if *value > 99 {
///             return Err(Error::InvalidArgument("satellite count has two digits"));
///         }
///         Ok(format!("{value:02}"))
///     }
/// }
///
/// assert_eq!(Satellites.parse("08"), Ok(Some(8)));
/// assert_eq!(Satellites.parse(""), Ok(None));
/// assert!(Satellites.parse("x").is_err());
/// assert_eq!(Satellites.format(&8).unwrap(), "08");
/// ```
pub trait Converter {
    type Value;

    /// Converts the text of a field, `Ok(None)` when the field is empty.
    fn parse(&self, text: &str) -> Result<Option<Self::Value>>;

    /// Converts a value into field text.
    ///
    /// Fails with [`Error::InvalidArgument`] when the value cannot be
    /// represented in the field.
    fn format(&self, value: &Self::Value) -> Result<String>;
}

/// Runs `parser` over the complete text of a field.
///
/// Empty text is reported as `Ok(None)`, text that is not fully consumed as
/// [`Error::InvalidField`].
pub fn parse_with<'a, O, P>(text: &'a str, parser: P) -> Result<Option<O>>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    if text.is_empty() {
        return Ok(None);
    }

    all_consuming(parser)
        .parse(text)
        .finish()
        .map(|(_, value)| Some(value))
        .map_err(|_| Error::InvalidField(text.to_string()))
}

/// Recognizes a plain decimal number: optional sign, digits, optional fraction.
///
/// Exponents, `inf` and `nan` are rejected.
pub fn decimal(i: &str) -> IResult<&str, f64> {
    map_res(
        recognize((
            opt(one_of("+-")),
            alt((
                recognize((digit1, opt((char('.'), digit0)))),
                recognize((char('.'), digit1)),
            )),
        )),
        str::parse::<f64>,
    )
    .parse(i)
}

/// Parses exactly `count` decimal digits into an integer.
pub fn digits<'a>(count: usize) -> impl Parser<&'a str, Output = u32, Error = nom::error::Error<&'a str>> {
    map_res(
        take_while_m_n(count, count, |c: char| c.is_ascii_digit()),
        str::parse::<u32>,
    )
}

/// Decimal number field, e.g. speed, course or a variation magnitude.
///
/// Formatting zero-pads the integer part to `integer_digits` and always
/// writes `fraction_digits` decimals, so `Decimal::new(3, 1)` writes `001.5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decimal {
    pub integer_digits: usize,
    pub fraction_digits: usize,
    pub min: f64,
    pub max: f64,
}

impl Decimal {
    pub const fn new(integer_digits: usize, fraction_digits: usize) -> Self {
        Self {
            integer_digits,
            fraction_digits,
            min: f64::MIN,
            max: f64::MAX,
        }
    }

    /// Restricts the values accepted when formatting.
    pub const fn within(self, min: f64, max: f64) -> Self {
        Self { min, max, ..self }
    }
}

impl Converter for Decimal {
    type Value = f64;

    fn parse(&self, text: &str) -> Result<Option<f64>> {
        parse_with(text, decimal)
    }

    fn format(&self, value: &f64) -> Result<String> {
        if !value.is_finite() {
            return Err(Error::InvalidArgument("value must be a finite number"));
        }
        if *value < self.min || *value > self.max {
            return Err(Error::InvalidArgument("value out of range"));
        }

        // -0.0 passes the range check and must not be written with a sign
        let value = if *value == 0.0 { 0.0 } else { *value };

        let precision = self.fraction_digits;
        let width = match precision {
            0 => self.integer_digits,
            _ => self.integer_digits + 1 + precision,
        } + usize::from(value < 0.0);

        Ok(format!("{value:0width$.precision$}"))
    }
}

/// UTC time of day, `hhmmss` with an optional fraction of one to three digits.
///
/// Formatting writes `hhmmss` for whole seconds and `hhmmss.sss` otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeOfDay;

impl Converter for TimeOfDay {
    type Value = time::Time;

    fn parse(&self, text: &str) -> Result<Option<time::Time>> {
        let (hour, minute, second, fraction) = match parse_with(
            text,
            (
                digits(2),
                digits(2),
                digits(2),
                opt(preceded(
                    char('.'),
                    take_while_m_n(1, 3, |c: char| c.is_ascii_digit()),
                )),
            ),
        )? {
            Some(parts) => parts,
            None => return Ok(None),
        };

        let millisecond = fraction.map_or(0, |fraction: &str| {
            fraction
                .bytes()
                .chain(std::iter::repeat(b'0'))
                .take(3)
                .fold(0u16, |ms, digit| ms * 10 + u16::from(digit - b'0'))
        });

        time::Time::from_hms_milli(hour as u8, minute as u8, second as u8, millisecond)
            .map(Some)
            .map_err(|_| Error::InvalidField(text.to_string()))
    }

    fn format(&self, value: &time::Time) -> Result<String> {
        let (hour, minute, second, millisecond) = value.as_hms_milli();

        Ok(match millisecond {
            0 => format!("{hour:02}{minute:02}{second:02}"),
            _ => format!("{hour:02}{minute:02}{second:02}.{millisecond:03}"),
        })
    }
}

/// UTC date, `ddmmyy`.
///
/// The protocol carries no century, the year is always read as `2000 + yy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarDate;

impl Converter for CalendarDate {
    type Value = time::Date;

    fn parse(&self, text: &str) -> Result<Option<time::Date>> {
        let (day, month, year) = match parse_with(text, (digits(2), digits(2), digits(2)))? {
            Some(parts) => parts,
            None => return Ok(None),
        };

        let invalid = || Error::InvalidField(text.to_string());
        let month = time::Month::try_from(month as u8).map_err(|_| invalid())?;

        time::Date::from_calendar_date(2000 + year as i32, month, day as u8)
            .map(Some)
            .map_err(|_| invalid())
    }

    fn format(&self, value: &time::Date) -> Result<String> {
        if !(2000..=2099).contains(&value.year()) {
            return Err(Error::InvalidArgument("year must be between 2000 and 2099"));
        }

        Ok(format!(
            "{:02}{:02}{:02}",
            value.day(),
            u8::from(value.month()),
            value.year() % 100
        ))
    }
}

/// Single letter field backed by a closed enumeration.
#[derive(Debug)]
pub struct Letter<T>(PhantomData<T>);

impl<T> Letter<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Letter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FieldLetter> Converter for Letter<T> {
    type Value = T;

    fn parse(&self, text: &str) -> Result<Option<T>> {
        parse_with(text, letter::<T>)
    }

    fn format(&self, value: &T) -> Result<String> {
        Ok(value.to_char().to_string())
    }
}

/// Parses one letter of a [`FieldLetter`] enumeration.
pub fn letter<T: FieldLetter>(i: &str) -> IResult<&str, T> {
    map_opt(anychar, T::from_char).parse(i)
}

/// Direction letter restricted to a subset of [`Direction`].
///
/// A letter outside of the subset is a format error when read and an invalid
/// argument when written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directions(pub &'static [Direction]);

impl Directions {
    pub const NORTH_SOUTH: Self = Self(&[Direction::North, Direction::South]);
    pub const EAST_WEST: Self = Self(&[Direction::East, Direction::West]);
}

impl Converter for Directions {
    type Value = Direction;

    fn parse(&self, text: &str) -> Result<Option<Direction>> {
        match parse_with(text, letter::<Direction>)? {
            Some(direction) if !self.0.contains(&direction) => {
                Err(Error::InvalidField(text.to_string()))
            }
            direction => Ok(direction),
        }
    }

    fn format(&self, value: &Direction) -> Result<String> {
        if !self.0.contains(value) {
            return Err(Error::InvalidArgument("direction not allowed in this field"));
        }

        Ok(value.to_char().to_string())
    }
}

/// Characters that may appear inside a field.
pub fn is_field_char(c: char) -> bool {
    c.is_ascii() && !c.is_ascii_control() && !matches!(c, ',' | '*' | '$' | '!')
}
