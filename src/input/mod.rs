//! Live input masking for the editable time field

pub mod formatter;

pub use formatter::{reformat, validate_input, KeyVerdict, MaskedText, EDITING_KEYS, MAX_DIGITS};
