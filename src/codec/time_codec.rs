//! `HH:MM:SS` parsing and formatting

use thiserror::Error;

/// Largest duration the two-digit hour field can carry (99:59:59)
pub const MAX_SECONDS: u32 = 99 * 3600 + 59 * 60 + 59;

/// Malformed or non-numeric time text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected 3 colon-separated fields, found {0}")]
    FieldCount(usize),

    #[error("field {field:?} is not an integer")]
    NotNumeric { field: String },

    #[error("total of {text:?} does not fit in a seconds count")]
    OutOfRange { text: String },
}

/// Parse `HH:MM:SS` into a total number of seconds.
///
/// Fields are not clamped to their natural range, so `"00:90:00"` is 5400.
/// Signed fields are accepted; rejecting non-positive totals is up to the caller.
pub fn parse(text: &str) -> Result<i64, ParseError> {
    let fields: Vec<&str> = text.split(':').collect();
    if fields.len() != 3 {
        return Err(ParseError::FieldCount(fields.len()));
    }

    let mut values = [0i64; 3];
    for (slot, field) in values.iter_mut().zip(&fields) {
        *slot = field.parse().map_err(|_| ParseError::NotNumeric {
            field: field.to_string(),
        })?;
    }

    let [hours, minutes, seconds] = values;
    hours
        .checked_mul(3600)
        .and_then(|total| total.checked_add(minutes.checked_mul(60)?))
        .and_then(|total| total.checked_add(seconds))
        .ok_or_else(|| ParseError::OutOfRange { text: text.to_string() })
}

/// Format seconds as zero-padded `HH:MM:SS`
pub fn format(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_text() {
        assert_eq!(parse("00:01:30"), Ok(90));
        assert_eq!(parse("01:00:00"), Ok(3600));
        assert_eq!(parse("99:59:59"), Ok(MAX_SECONDS as i64));
    }

    #[test]
    fn does_not_clamp_fields() {
        assert_eq!(parse("00:90:00"), Ok(5400));
        assert_eq!(parse("00:00:75"), Ok(75));
        assert_eq!(parse("1:2:3"), Ok(3723));
    }

    #[test]
    fn negative_fields_parse_to_signed_total() {
        assert_eq!(parse("-1:00:00"), Ok(-3600));
    }

    #[test]
    fn rejects_malformed_text() {
        assert!(matches!(parse("1a:00:00"), Err(ParseError::NotNumeric { .. })));
        assert_eq!(parse("00:00"), Err(ParseError::FieldCount(2)));
        assert!(parse("").is_err());
        assert!(parse("00:00:00:00").is_err());
        assert!(parse("00::00").is_err());
    }

    #[test]
    fn huge_fields_are_out_of_range() {
        let text = format!("{}:00:00", i64::MAX);
        assert_eq!(parse(&text), Err(ParseError::OutOfRange { text: text.clone() }));
        assert!(matches!(parse("00:9223372036854775807:00"), Err(ParseError::OutOfRange { .. })));
        assert!(matches!(parse("2562047788015215:59:59"), Err(ParseError::OutOfRange { .. })));
        assert!(parse("-9223372036854775808:00:00").is_err());
        assert_eq!(parse("00:00:9223372036854775807"), Ok(i64::MAX));
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format(0), "00:00:00");
        assert_eq!(format(90), "00:01:30");
        assert_eq!(format(3661), "01:01:01");
        assert_eq!(format(MAX_SECONDS), "99:59:59");
    }

    #[test]
    fn format_inverts_parse_for_canonical_text() {
        for text in ["00:00:01", "00:59:59", "12:34:56", "99:00:00"] {
            let seconds = parse(text).unwrap() as u32;
            assert_eq!(format(seconds), text);
        }
    }
}
