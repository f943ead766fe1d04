use nmea0183_sentence::{
    ChecksumMode, ParseOptions, Rmc, SentenceView,
    field::{Direction, GpsMode, Position},
};
use tracing_subscriber::EnvFilter;

const LINES: [&str; 3] = [
    "$GPRMC,120044,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*11",
    "$GPRMC,120044,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*12",
    "$GPRMC,,V,,,,,,,,,,N*53",
];

fn rewrite(rmc: &mut Rmc) -> nmea0183_sentence::Result<()> {
    if let Some(position) = rmc.position()? {
        let shifted = Position::new(position.latitude() + 0.5, position.longitude())?;
        rmc.set_position(shifted)?;
    }

    rmc.set_direction_of_variation(Direction::West)?;
    rmc.set_gps_mode(GpsMode::Differential)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = ParseOptions::new().checksum(ChecksumMode::Lenient);

    for line in LINES {
        let mut rmc = match Rmc::parse_with(line, &options) {
            Ok(rmc) => rmc,
            Err(e) => {
                println!("Rejected '{line}': {e}");
                continue;
            }
        };

        println!("Read:      {line}");
        println!("Position:  {:?}", rmc.position());
        println!("Variation: {:?}", rmc.variation());
        println!("Timestamp: {:?}", rmc.timestamp());

        match rewrite(&mut rmc) {
            Ok(()) => println!("Rewritten: {rmc}"),
            Err(e) => println!("Rewrite failed: {e}"),
        }
    }
}
