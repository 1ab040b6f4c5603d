//! Time text codec
//!
//! Converts between the canonical `HH:MM:SS` text and a count of seconds.

pub mod time_codec;

pub use time_codec::{format, parse, ParseError, MAX_SECONDS};
