use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A closed enumeration stored as a single letter in a field.
pub trait FieldLetter: Sized {
    fn from_char(c: char) -> Option<Self>;
    fn to_char(&self) -> char;
}

macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl FieldLetter for $name {
            fn from_char(c: char) -> Option<Self> {
                match c {
                    $($char => Some(Self::$variant),)*
                    _ => None,
                }
            }

            fn to_char(&self) -> char {
                match self {
                    $(Self::$variant => $char,)*
                }
            }
        }

        impl TryFrom<char> for $name {
            type Error = crate::Error;

            fn try_from(c: char) -> Result<Self, Self::Error> {
                Self::from_char(c).ok_or_else(|| crate::Error::InvalidField(c.to_string()))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_char())
            }
        }
    };
}

field_enum! {
    /// Compass direction, also used as hemisphere indicator
    pub enum Direction {
        /// N - North
        'N' => North,
        /// S - South
        'S' => South,
        /// E - East
        'E' => East,
        /// W - West
        'W' => West,
    }
}

field_enum! {
    /// Status Mode Indicator
    pub enum DataStatus {
        /// A - Valid
        'A' => Valid,
        /// V - Invalid
        'V' => Invalid,
    }
}

field_enum! {
    /// GPS Mode Indicator
    ///
    /// <https://gpsd.gitlab.io/gpsd/NMEA.html#_sentence_mixes_and_nmea_variations>
    pub enum GpsMode {
        /// A - Autonomous mode
        'A' => Automatic,
        /// D - Differential Mode
        'D' => Differential,
        /// E - Estimated (dead-reckoning) mode
        'E' => Estimated,
        /// F - RTK Float mode
        'F' => FloatRtk,
        /// M - Manual Input Mode
        'M' => Manual,
        /// N - Data Not Valid
        'N' => None,
        /// P - Precise
        'P' => Precise,
        /// R - RTK Integer mode
        'R' => FixedRtk,
        /// S - Simulated Mode
        'S' => Simulated,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Error;

    #[test]
    fn test_direction() {
        assert_eq!(Direction::from_char('N'), Some(Direction::North));
        assert_eq!(Direction::from_char('S'), Some(Direction::South));
        assert_eq!(Direction::from_char('E'), Some(Direction::East));
        assert_eq!(Direction::from_char('W'), Some(Direction::West));
        assert_eq!(Direction::from_char('n'), None);
        assert_eq!(Direction::West.to_char(), 'W');
    }

    #[test]
    fn test_status() {
        assert_eq!(DataStatus::try_from('A'), Ok(DataStatus::Valid));
        assert_eq!(DataStatus::try_from('V'), Ok(DataStatus::Invalid));
        assert_eq!(
            DataStatus::try_from('K'),
            Err(Error::InvalidField("K".to_string()))
        );
        assert_eq!(DataStatus::Valid.to_string(), "A");
    }

    #[test]
    fn test_gps_mode() {
        for c in "ADEFMNPRS".chars() {
            let mode = GpsMode::from_char(c).unwrap();
            assert_eq!(mode.to_char(), c);
        }
        assert_eq!(GpsMode::from_char('A'), Some(GpsMode::Automatic));
        assert_eq!(GpsMode::from_char('S'), Some(GpsMode::Simulated));
        assert_eq!(GpsMode::from_char('N'), Some(GpsMode::None));
        assert_eq!(GpsMode::from_char('X'), None);
    }
}
