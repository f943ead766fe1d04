use nom::{
    Parser,
    bytes::complete::take_while_m_n,
    character::complete::{char, digit0},
    combinator::{map_res, opt, recognize},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    Error, Result,
    field::{Converter, Direction, Directions, digits, parse_with},
};

/// Geographic position in signed decimal degrees, North and East positive.
///
/// The hemisphere is carried by the sign bit, so a position read from
/// `0000.000,S` keeps reporting [`Direction::South`].
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    latitude: f64,
    longitude: f64,
}

impl Position {
    /// Creates a position from signed decimal degrees.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_sentence::field::{Direction, Position};
    ///
    /// let position = Position::new(-33.8568, 151.2153).unwrap();
    /// assert_eq!(position.lat_hemisphere(), Direction::South);
    /// assert_eq!(position.lon_hemisphere(), Direction::East);
    ///
    /// assert!(Position::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        Axis::Latitude.check(latitude)?;
        Axis::Longitude.check(longitude)?;

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Creates a position from unsigned magnitudes and hemisphere directions.
    ///
    /// The latitude hemisphere must be North or South and the longitude
    /// hemisphere East or West.
    pub fn from_hemispheres(
        latitude: f64,
        lat_hemisphere: Direction,
        longitude: f64,
        lon_hemisphere: Direction,
    ) -> Result<Self> {
        let latitude = Axis::Latitude.signed(latitude, lat_hemisphere)?;
        let longitude = Axis::Longitude.signed(longitude, lon_hemisphere)?;

        Self::new(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn lat_hemisphere(&self) -> Direction {
        Axis::Latitude.hemisphere(self.latitude)
    }

    pub fn lon_hemisphere(&self) -> Direction {
        Axis::Longitude.hemisphere(self.longitude)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Degrees {
            latitude: f64,
            longitude: f64,
        }

        let Degrees {
            latitude,
            longitude,
        } = Degrees::deserialize(deserializer)?;
        Self::new(latitude, longitude).map_err(serde::de::Error::custom)
    }
}

/// Coordinate axis of a degrees-minutes field pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// `DDMM.MMM` followed by `N` or `S`
    Latitude,
    /// `DDDMM.MMM` followed by `E` or `W`
    Longitude,
}

impl Axis {
    const fn degree_digits(self) -> usize {
        match self {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        }
    }

    const fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    const fn hemispheres(self) -> Directions {
        match self {
            Axis::Latitude => Directions::NORTH_SOUTH,
            Axis::Longitude => Directions::EAST_WEST,
        }
    }

    fn hemisphere(self, degrees: f64) -> Direction {
        match (self, degrees.is_sign_negative()) {
            (Axis::Latitude, false) => Direction::North,
            (Axis::Latitude, true) => Direction::South,
            (Axis::Longitude, false) => Direction::East,
            (Axis::Longitude, true) => Direction::West,
        }
    }

    fn check(self, degrees: f64) -> Result<()> {
        if !degrees.is_finite() || degrees.abs() > self.limit() {
            return Err(match self {
                Axis::Latitude => Error::InvalidArgument("latitude must be within [-90, 90]"),
                Axis::Longitude => Error::InvalidArgument("longitude must be within [-180, 180]"),
            });
        }
        Ok(())
    }

    fn signed(self, magnitude: f64, hemisphere: Direction) -> Result<f64> {
        self.hemispheres().format(&hemisphere)?;
        if magnitude.is_sign_negative() {
            return Err(Error::InvalidArgument("coordinate magnitude must not be negative"));
        }

        Ok(match hemisphere {
            Direction::South | Direction::West => -magnitude,
            Direction::North | Direction::East => magnitude,
        })
    }

    /// Reads a degrees-minutes value and its hemisphere letter as signed degrees.
    ///
    /// The coordinate is not available when either field is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_sentence::field::Axis;
    ///
    /// let lat = Axis::Latitude.parse("6011.552", "N").unwrap().unwrap();
    /// assert!((lat - (60.0 + 11.552 / 60.0)).abs() < 1e-7);
    ///
    /// let lon = Axis::Longitude.parse("02501.941", "W").unwrap().unwrap();
    /// assert!((lon + (25.0 + 1.941 / 60.0)).abs() < 1e-7);
    ///
    /// assert_eq!(Axis::Latitude.parse("", ""), Ok(None));
    /// ```
    pub fn parse(self, value: &str, hemisphere: &str) -> Result<Option<f64>> {
        let minutes = map_res(
            recognize((
                take_while_m_n(2, 2, |c: char| c.is_ascii_digit()),
                opt((char('.'), digit0)),
            )),
            str::parse::<f64>,
        );

        let magnitude = match parse_with(value, (digits(self.degree_digits()), minutes))? {
            Some((degrees, minutes)) if minutes < 60.0 => {
                let magnitude = f64::from(degrees) + minutes / 60.0;
                if magnitude > self.limit() {
                    return Err(Error::InvalidField(value.to_string()));
                }
                Some(magnitude)
            }
            Some(_) => return Err(Error::InvalidField(value.to_string())),
            None => None,
        };
        let hemisphere = self.hemispheres().parse(hemisphere)?;

        Ok(match (magnitude, hemisphere) {
            (Some(magnitude), Some(Direction::South | Direction::West)) => Some(-magnitude),
            (Some(magnitude), Some(_)) => Some(magnitude),
            _ => None,
        })
    }

    /// Writes signed degrees as `(D)DDMM.MMM` and its hemisphere letter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_sentence::field::{Axis, Direction};
    ///
    /// let (value, hemisphere) = Axis::Latitude.format(60.0 + 11.552 / 60.0).unwrap();
    /// assert_eq!(value, "6011.552");
    /// assert_eq!(hemisphere, Direction::North);
    ///
    /// let (value, hemisphere) = Axis::Longitude.format(-(7.0 + 0.5 / 60.0)).unwrap();
    /// assert_eq!(value, "00700.500");
    /// assert_eq!(hemisphere, Direction::West);
    /// ```
    pub fn format(self, degrees: f64) -> Result<(String, Direction)> {
        self.check(degrees)?;

        let thousandths = (degrees.abs() * 60_000.0).round() as u64;
        let (whole, minutes) = (thousandths / 60_000, thousandths % 60_000);
        let value = format!(
            "{whole:0width$}{:02}.{:03}",
            minutes / 1000,
            minutes % 1000,
            width = self.degree_digits()
        );

        Ok((value, self.hemisphere(degrees)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_latitude() {
        let lat = Axis::Latitude.parse("6011.552", "N").unwrap().unwrap();
        assert!((lat - 60.192533333).abs() < 1e-7);

        let lat = Axis::Latitude.parse("4916.45", "S").unwrap().unwrap();
        assert!((lat + (49.0 + 16.45 / 60.0)).abs() < 1e-7);

        let lat = Axis::Latitude.parse("9000.000", "S").unwrap().unwrap();
        assert_eq!(lat, -90.0);

        let lat = Axis::Latitude.parse("0000.000", "S").unwrap().unwrap();
        assert_eq!(Axis::Latitude.hemisphere(lat), Direction::South);
    }

    #[test]
    fn test_parse_absent() {
        assert_eq!(Axis::Latitude.parse("", ""), Ok(None));
        assert_eq!(Axis::Latitude.parse("6011.552", ""), Ok(None));
        assert_eq!(Axis::Longitude.parse("", "E"), Ok(None));
    }

    #[test]
    fn test_parse_malformed() {
        let cases = [
            (Axis::Latitude, "601.552", "N"),
            (Axis::Latitude, "6061.552", "N"),
            (Axis::Latitude, "9100.000", "N"),
            (Axis::Latitude, "60x1.552", "N"),
            (Axis::Latitude, "6011.552", "E"),
            (Axis::Longitude, "2501.941", "E"),
            (Axis::Longitude, "18001.000", "E"),
            (Axis::Longitude, "02501.941", "N"),
            (Axis::Longitude, "02501.941", "EE"),
        ];

        for (axis, value, hemisphere) in cases {
            assert!(
                matches!(axis.parse(value, hemisphere), Err(Error::InvalidField(_))),
                "Accepted {value:?},{hemisphere:?}"
            );
        }
    }

    #[test]
    fn test_format() {
        let (value, hemisphere) = Axis::Latitude.format(61.0 + 1.111 / 60.0).unwrap();
        assert_eq!((value.as_str(), hemisphere), ("6101.111", Direction::North));

        let (value, hemisphere) = Axis::Longitude.format(27.0 + 7.777 / 60.0).unwrap();
        assert_eq!((value.as_str(), hemisphere), ("02707.777", Direction::East));

        let (value, hemisphere) = Axis::Longitude.format(-180.0).unwrap();
        assert_eq!((value.as_str(), hemisphere), ("18000.000", Direction::West));

        // 59.9999 minutes rounds up into the next degree
        let (value, _) = Axis::Latitude.format(10.0 + 59.9999 / 60.0).unwrap();
        assert_eq!(value, "1100.000");

        assert!(Axis::Latitude.format(90.5).is_err());
        assert!(Axis::Longitude.format(f64::NAN).is_err());
    }

    #[test]
    fn test_position() {
        let position =
            Position::from_hemispheres(60.5, Direction::South, 25.25, Direction::West).unwrap();
        assert_eq!(position.latitude(), -60.5);
        assert_eq!(position.longitude(), -25.25);
        assert_eq!(position.lat_hemisphere(), Direction::South);
        assert_eq!(position.lon_hemisphere(), Direction::West);

        assert!(Position::from_hemispheres(60.5, Direction::East, 25.25, Direction::West).is_err());
        assert!(Position::from_hemispheres(60.5, Direction::North, 25.25, Direction::North).is_err());
        assert!(Position::from_hemispheres(-60.5, Direction::North, 25.25, Direction::East).is_err());
        assert!(Position::new(0.0, 180.5).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_position_serde() {
        let position = Position::new(-33.5, 151.25).unwrap();
        let json = serde_json::to_string(&position).unwrap();
        assert_eq!(json, r#"{"latitude":-33.5,"longitude":151.25}"#);
        assert_eq!(serde_json::from_str::<Position>(&json).unwrap(), position);

        assert!(serde_json::from_str::<Position>(r#"{"latitude":200.0,"longitude":0.0}"#).is_err());
        assert!(serde_json::from_str::<Position>(r#"{"latitude":0.0,"longitude":-180.5}"#).is_err());
    }
}
