//! Timer error taxonomy

use thiserror::Error;

use crate::codec::{ParseError, MAX_SECONDS};

/// User-facing notice shared by every duration validation failure
pub const INVALID_DURATION_NOTICE: &str = "Please enter a valid duration in HH:MM:SS format.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("malformed duration: {0}")]
    Parse(#[from] ParseError),

    #[error("duration must be between 1 and {max} seconds, got {seconds}", max = MAX_SECONDS)]
    InvalidDuration { seconds: i64 },

    #[error("a countdown is already active")]
    AlreadyActive,

    #[error("timer is not running")]
    NotRunning,

    #[error("timer is not paused")]
    NotPaused,

    #[error("no countdown to stop")]
    NotActive,

    #[error("display can only be edited while idle")]
    NotIdle,
}

impl TimerError {
    /// Parse and duration failures are fixed by correcting the input
    pub fn is_validation(&self) -> bool {
        matches!(self, TimerError::Parse(_) | TimerError::InvalidDuration { .. })
    }

    /// Message shown to the user
    pub fn notice(&self) -> String {
        if self.is_validation() {
            INVALID_DURATION_NOTICE.to_string()
        } else {
            self.to_string()
        }
    }
}
