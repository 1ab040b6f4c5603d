//! Alert notification module
//!
//! The engine signals completion through [`NotificationSink`]; the service
//! plays the configured sound through an external audio player.

pub mod audio;
pub mod sink;

pub use audio::{play_clip, AudioAlert, PlayerCommand, DEFAULT_CLIP};
pub use sink::{AlertSound, NotificationSink, TIMES_UP};
