use crate::{Delimiter, Error, Rmc, Sentence, SentenceView, checksum};

const LINES: [&str; 8] = [
    "$GPRMC,120044,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*11",
    "$GPRMC,120044,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E*7C",
    "$GNSRMC,120044,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*5C",
    "$GPGGA,092725.00,4717.113,N,00833.915,E,1,08,1.0,499.7,M,48.0,M,,*62",
    "$GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00*74",
    "$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39",
    "$SDDBT,1330.5,f,0405.5,M,0221.6,F*31",
    "!AIVDM,1,1,,A,13aEOK?P00PD2wVMdLDRhgvL289?,0*26",
];

#[test]
fn test_sentences_round_trip() {
    for line in LINES {
        let sentence = Sentence::parse(line).unwrap();
        assert_eq!(sentence.to_wire_string(), line);
    }
}

#[test]
fn test_lowercase_checksum_is_written_uppercase() {
    let sentence = Sentence::parse(
        "$GNSRMC,120044,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*5c",
    )
    .unwrap();

    assert_eq!(sentence.talker_id().as_str(), "GNS");
    assert_eq!(sentence.sentence_id().as_str(), "RMC");
    assert!(sentence.to_wire_string().ends_with("*5C"));
}

#[test]
fn test_view_round_trip() {
    for line in &LINES[..3] {
        let rmc = Rmc::parse(line).unwrap();
        assert_eq!(rmc.to_wire_string(), *line);

        let sentence = Sentence::from(rmc);
        assert_eq!(sentence.to_string(), *line);
    }
}

#[test]
fn test_view_requires_its_sentence_type() {
    for line in &LINES[3..] {
        let error = Rmc::parse(line).unwrap_err();
        assert!(matches!(error, Error::UnrecognizedSentence(_)), "{line}: {error}");
    }
}

#[test]
fn test_mutated_sentence_reparses() {
    let mut rmc = Rmc::parse(LINES[0]).unwrap();
    rmc.set_speed(5.5).unwrap();
    rmc.set_course(90.0).unwrap();

    let wire = rmc.to_wire_string();
    assert!(checksum::validate(&wire));

    let reparsed = Rmc::parse(&wire).unwrap();
    assert_eq!(reparsed, rmc);
    assert_eq!(reparsed.speed(), Ok(Some(5.5)));
    assert_eq!(reparsed.course(), Ok(Some(90.0)));
}

#[test]
fn test_delimiter_is_kept() {
    let sentence = Sentence::parse(LINES[7]).unwrap();
    assert_eq!(sentence.delimiter(), Delimiter::Encapsulated);
    assert!(sentence.to_wire_string().starts_with('!'));
}
