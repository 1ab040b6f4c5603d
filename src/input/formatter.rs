//! Input formatter
//!
//! Reduces whatever is currently in the edit buffer to the `HH:MM:SS` mask
//! and reports where the caret belongs afterwards. The caret always lands at
//! the end of the cleaned text, so mid-field edits jump to the end after each
//! keystroke.

use serde::{Deserialize, Serialize};

/// Number of digits the mask can hold (HHMMSS)
pub const MAX_DIGITS: usize = 6;

/// Non-digit keys that pass the key-down filter
pub const EDITING_KEYS: &[&str] = &["Backspace", "Delete", "ArrowLeft", "ArrowRight"];

/// Masked edit buffer plus the caret offset (in characters) to restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedText {
    pub text: String,
    pub caret: usize,
}

/// Whether a key-down should reach the edit buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyVerdict {
    Accept,
    Suppress,
}

impl KeyVerdict {
    pub fn is_accepted(self) -> bool {
        self == KeyVerdict::Accept
    }
}

/// Mask raw edit text into `DD`, `DD:D…` or `DD:DD:D…`.
///
/// Non-digits are dropped and only the leftmost six digits are kept. Short
/// input is not zero padded.
pub fn reformat(raw: &str) -> MaskedText {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_DIGITS)
        .collect();

    let mut text = String::with_capacity(MAX_DIGITS + 2);
    for (i, digit) in digits.chars().enumerate() {
        if i == 2 || i == 4 {
            text.push(':');
        }
        text.push(digit);
    }

    let caret = text.chars().count();
    MaskedText { text, caret }
}

/// Key-down filter: digits and the four editing keys pass, anything else is suppressed
pub fn validate_input(key: &str) -> KeyVerdict {
    let mut chars = key.chars();
    let single_digit = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_digit());

    if single_digit || EDITING_KEYS.contains(&key) {
        KeyVerdict::Accept
    } else {
        KeyVerdict::Suppress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_colons_as_digits_grow() {
        assert_eq!(reformat("1").text, "1");
        assert_eq!(reformat("12").text, "12");
        assert_eq!(reformat("123").text, "12:3");
        assert_eq!(reformat("1234").text, "12:34");
        assert_eq!(reformat("12345").text, "12:34:5");
        assert_eq!(reformat("123456").text, "12:34:56");
    }

    #[test]
    fn drops_digits_past_the_sixth() {
        assert_eq!(reformat("1234567").text, "12:34:56");
    }

    #[test]
    fn strips_non_digits() {
        assert_eq!(reformat("1a:2b:3c").text, "12:3");
        assert_eq!(reformat("::").text, "");
        assert_eq!(reformat("00:0１:30").text, "00:03:0");
    }

    #[test]
    fn caret_sits_at_end_of_text() {
        assert_eq!(reformat("12345").caret, 7);
        assert_eq!(reformat("").caret, 0);
        assert_eq!(reformat("9").caret, 1);
    }

    #[test]
    fn reformat_is_idempotent() {
        for raw in ["", "1", "12:3", "1234567", "ab12cd34ef56gh", "00:00:00", "9:9:9:9"] {
            let once = reformat(raw);
            assert_eq!(reformat(&once.text), once);
        }
    }

    #[test]
    fn key_filter() {
        for key in ["0", "7", "Backspace", "Delete", "ArrowLeft", "ArrowRight"] {
            assert!(validate_input(key).is_accepted(), "{key} should pass");
        }
        for key in [":", "a", "F1", "Enter", "Tab", "ArrowUp", " ", "", "12"] {
            assert_eq!(validate_input(key), KeyVerdict::Suppress, "{key} should be suppressed");
        }
    }
}
