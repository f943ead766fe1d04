use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::{
    Error, Result,
    field::{
        Axis, CalendarDate, Converter, DataStatus, Decimal, Direction, Directions, GpsMode, Letter,
        Position, TimeOfDay,
    },
    sentences::{SentenceView, sentence_view},
};

const TIME: usize = 0;
const LATITUDE: usize = 2;
const LAT_HEMISPHERE: usize = 3;
const LONGITUDE: usize = 4;
const LON_HEMISPHERE: usize = 5;
const DATE: usize = 8;
const VARIATION: usize = 9;

const SPEED: Decimal = Decimal::new(1, 1).within(0.0, f64::MAX);
const COURSE: Decimal = Decimal::new(3, 1).within(0.0, 360.0);
const MAGNITUDE: Decimal = Decimal::new(3, 1).within(0.0, 180.0);

sentence_view! {
    /// RMC - Recommended Minimum Navigation Information
    ///
    /// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
    ///
    /// ```text
    ///         1         2 3       4 5        6  7   8   9    10 11 12
    ///         |         | |       | |        |  |   |   |    |  |  |
    ///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a,m*hh<CR><LF>
    /// ```
    ///
    /// The mode indicator (field 12) only exists since NMEA 2.3; it reads as
    /// not available on 11-field sentences.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_sentence::{Rmc, SentenceView, field::{DataStatus, Direction}};
    ///
    /// let mut rmc: Rmc = "$GPRMC,120044,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*11"
    ///     .parse()
    ///     .unwrap();
    ///
    /// assert_eq!(rmc.status(), Ok(Some(DataStatus::Valid)));
    /// assert_eq!(rmc.variation(), Ok(Some(-6.1)));
    ///
    /// rmc.set_direction_of_variation(Direction::West).unwrap();
    /// assert_eq!(rmc.variation(), Ok(Some(6.1)));
    /// assert!(rmc.to_wire_string().contains(",006.1,W,A*"));
    /// ```
    pub struct Rmc("RMC", 11..=12) {
        /// UTC time of the fix
        0 => time, set_time: Time = TimeOfDay,
        /// Status Mode Indicator
        1 => status, set_status: DataStatus = Letter::<DataStatus>::new(),
        /// Speed over ground in knots
        6 => speed, set_speed: f64 = SPEED,
        /// Course over ground in degrees true
        7 => course, set_course: f64 = COURSE,
        /// UTC date of the fix
        8 => date, set_date: Date = CalendarDate,
        /// Direction of the magnetic variation, East or West
        10 => direction_of_variation, set_direction_of_variation: Direction = Directions::EAST_WEST,
        /// GPS Mode Indicator
        11 => gps_mode, set_gps_mode: GpsMode = Letter::<GpsMode>::new(),
    }
}

impl Rmc {
    /// Position of the fix, not available when any of its four fields is empty.
    pub fn position(&self) -> Result<Option<Position>> {
        let sentence = self.sentence();
        let latitude =
            Axis::Latitude.parse(sentence.field(LATITUDE)?, sentence.field(LAT_HEMISPHERE)?)?;
        let longitude =
            Axis::Longitude.parse(sentence.field(LONGITUDE)?, sentence.field(LON_HEMISPHERE)?)?;

        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Position::new(latitude, longitude).map(Some),
            _ => Ok(None),
        }
    }

    /// Writes the four position fields at once.
    pub fn set_position(&mut self, position: Position) -> Result<()> {
        let (latitude, lat_hemisphere) = Axis::Latitude.format(position.latitude())?;
        let (longitude, lon_hemisphere) = Axis::Longitude.format(position.longitude())?;

        self.sentence_mut().set_fields([
            (LATITUDE, latitude),
            (LAT_HEMISPHERE, lat_hemisphere.to_string()),
            (LONGITUDE, longitude),
            (LON_HEMISPHERE, lon_hemisphere.to_string()),
        ])
    }

    /// Magnetic variation in degrees, easterly variation is negative.
    pub fn variation(&self) -> Result<Option<f64>> {
        let magnitude = self.read(VARIATION, &MAGNITUDE)?;
        let direction = self.direction_of_variation()?;

        Ok(match (magnitude, direction) {
            (Some(magnitude), Some(Direction::East)) => Some(-magnitude),
            (Some(magnitude), Some(_)) => Some(magnitude),
            _ => None,
        })
    }

    /// Writes the magnitude of the magnetic variation.
    ///
    /// The direction is a separate field, see
    /// [`set_direction_of_variation`](Self::set_direction_of_variation).
    pub fn set_variation(&mut self, magnitude: f64) -> Result<()> {
        self.write(VARIATION, &MAGNITUDE, &magnitude)
    }

    /// Course corrected by the magnetic variation.
    pub fn corrected_course(&self) -> Result<Option<f64>> {
        let course = self.course()?;
        let variation = self.variation()?;

        Ok(course.zip(variation).map(|(course, variation)| course + variation))
    }

    /// Date and time of the fix combined into a UTC timestamp.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nmea0183_sentence::{Rmc, SentenceView};
    ///
    /// let rmc = Rmc::parse("$GPRMC,120044,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*11").unwrap();
    /// let timestamp = rmc.timestamp().unwrap().unwrap();
    /// assert_eq!(timestamp.unix_timestamp(), 1_121_515_244);
    /// ```
    pub fn timestamp(&self) -> Result<Option<OffsetDateTime>> {
        let date = self.date()?;
        let time = self.time()?;

        Ok(date
            .zip(time)
            .map(|(date, time)| PrimitiveDateTime::new(date, time).assume_utc()))
    }

    /// Writes the date and time fields from `timestamp` converted to UTC.
    pub fn set_timestamp(&mut self, timestamp: OffsetDateTime) -> Result<()> {
        let timestamp = timestamp
            .checked_to_offset(UtcOffset::UTC)
            .ok_or(Error::InvalidArgument("timestamp out of range"))?;
        let date = CalendarDate.format(&timestamp.date())?;
        let time = TimeOfDay.format(&timestamp.time())?;

        self.sentence_mut().set_fields([(DATE, date), (TIME, time)])
    }
}
