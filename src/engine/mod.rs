//! Countdown engine
//!
//! Owns one [`TimerState`](crate::state::TimerState) and performs every
//! transition on it. The engine is synchronous; the periodic tick is driven
//! from outside by calling [`TimerEngine::tick`].

pub mod error;
pub mod events;
pub mod timer_engine;

pub use error::{TimerError, INVALID_DURATION_NOTICE};
pub use events::{TickOutcome, TimerEvent, TimerSnapshot};
pub use timer_engine::TimerEngine;
