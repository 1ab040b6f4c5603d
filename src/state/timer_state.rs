//! Timer state structure

use serde::{Deserialize, Serialize};

use crate::codec;

/// Countdown lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    /// Reached zero; reset to Idle within the same tick
    Finished,
}

/// Single timer's countdown state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: TimerPhase,
    pub remaining_seconds: u32,
    /// Edit buffer / display text
    pub display: String,
    /// A periodic tick is registered for this countdown
    pub ticking: bool,
}

impl TimerState {
    /// Create an idle timer state showing `00:00:00`
    pub fn new() -> Self {
        Self {
            phase: TimerPhase::Idle,
            remaining_seconds: 0,
            display: codec::format(0),
            ticking: false,
        }
    }

    /// Create a running state for a freshly started countdown
    pub fn running(remaining_seconds: u32) -> Self {
        Self {
            phase: TimerPhase::Running,
            remaining_seconds,
            display: codec::format(remaining_seconds),
            ticking: true,
        }
    }

    /// Running or paused
    pub fn is_active(&self) -> bool {
        matches!(self.phase, TimerPhase::Running | TimerPhase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == TimerPhase::Paused
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
