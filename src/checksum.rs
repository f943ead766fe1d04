//! # Checksum Codec
//!
//! NMEA 0183 protects each sentence with a single byte: the XOR of every byte
//! between the leading `$`/`!` and the `*` delimiter, transmitted as two
//! uppercase hexadecimal digits.

/// Calculates the NMEA 0183 checksum for the given sentence body.
///
/// The body is everything between the `$`/`!` sentinel and the `*` delimiter,
/// both excluded.
///
/// # Examples
///
/// ```rust
/// use nmea0183_sentence::checksum;
///
/// let cc = checksum("GPRMC,120044,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A");
/// assert_eq!(cc, 0x11);
/// ```
pub fn checksum(body: &str) -> u8 {
    body.as_bytes()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Formats a checksum value as a two-digit uppercase hexadecimal string.
///
/// # Examples
///
/// ```rust
/// use nmea0183_sentence::format_checksum;
///
/// assert_eq!(format_checksum(0x41), "41");
/// assert_eq!(format_checksum(0x0A), "0A");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}

/// Calculates the checksum of a complete or partial sentence.
///
/// A leading `$` or `!` is skipped and calculation stops at the first `*`, so
/// any existing checksum is ignored.
pub fn calculate(sentence: &str) -> u8 {
    let body = sentence
        .strip_prefix(['$', '!'])
        .unwrap_or(sentence);
    let body = body.split_once('*').map_or(body, |(body, _)| body);

    checksum(body)
}

/// Returns `true` when the two hexadecimal digits after the first `*` match
/// the checksum calculated over the sentence body.
///
/// Hexadecimal digits are accepted in either case. Anything that does not end
/// in `*HH` is reported as invalid.
///
/// # Examples
///
/// ```rust
/// use nmea0183_sentence::checksum::validate;
///
/// assert!(validate("$GPGGA,123456,data*41"));
/// assert!(!validate("$GPGGA,123456,data*42"));
/// assert!(!validate("$GPGGA,123456,data"));
/// ```
pub fn validate(sentence: &str) -> bool {
    let Some((_, digits)) = sentence.split_once('*') else {
        return false;
    };

    if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }

    u8::from_str_radix(digits, 16).is_ok_and(|found| found == calculate(sentence))
}

/// Appends `*HH` to a sentence that does not carry a checksum yet.
///
/// Any existing checksum is replaced.
///
/// # Examples
///
/// ```rust
/// use nmea0183_sentence::checksum::append;
///
/// assert_eq!(append("$GPGGA,123456,data"), "$GPGGA,123456,data*41");
/// assert_eq!(append("$GPGGA,123456,data*00"), "$GPGGA,123456,data*41");
/// ```
pub fn append(sentence: &str) -> String {
    let unsigned = sentence.split_once('*').map_or(sentence, |(head, _)| head);
    format!("{unsigned}*{}", format_checksum(calculate(unsigned)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str =
        "$GPRMC,120044,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*11";

    #[test]
    fn test_checksum_of_example_body() {
        let body = "GPRMC,120044,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A";
        assert_eq!(format_checksum(checksum(body)), "11");
    }

    #[test]
    fn test_calculate_skips_framing() {
        assert_eq!(calculate(EXAMPLE), 0x11);
        assert_eq!(calculate(&EXAMPLE[1..]), 0x11);
        assert_eq!(calculate("!AIVDM,1,1,,A,13aEOK?P00PD2wVMdLDRhgvL289?,0*26"), 0x26);
    }

    #[test]
    fn test_validate() {
        assert!(validate(EXAMPLE));
        assert!(validate("$GPGGA,data*6a"));
        assert!(!validate("$GPRMC,120044,A,6011.552,N,02501.941,E,000.0,360.0,160705,006.1,E,A*7C"));
        assert!(!validate("$GPGGA,data*6"));
        assert!(!validate("$GPGGA,data*6AB"));
        assert!(!validate("$GPGGA,data*zz"));
    }

    #[test]
    fn test_stray_asterisk() {
        // the checksum belongs to the text before the first `*`
        let line = "$GPGGA,da*ta*7F";
        assert_eq!(calculate(line), 0x7F);
        assert!(!validate(line));
        assert!(validate("$GPGGA,da*7F"));
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(checksum(""), 0);
        assert_eq!(append("$"), "$*00");
    }
}
