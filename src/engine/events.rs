//! Lifecycle signals and status snapshots

use serde::{Deserialize, Serialize};

use crate::state::{TimerPhase, TimerState};

/// Lifecycle signal emitted by a transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum TimerEvent {
    Started { seconds: u32 },
    Tick { remaining_seconds: u32, display: String },
    Paused { remaining_seconds: u32 },
    Resumed { remaining_seconds: u32 },
    Finished { notice: String },
    Stopped,
}

/// Result of delivering one tick to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Decremented, countdown continues
    Counted(TimerEvent),
    /// Paused; the tick is a no-op
    Skipped,
    /// Reached zero; tick registration cancelled and engine reset
    Finished(TimerEvent),
    /// No tick is registered (stopped, finished or never started)
    Cancelled,
}

impl TickOutcome {
    /// Whether the tick driver should keep firing
    pub fn keeps_ticking(&self) -> bool {
        matches!(self, TickOutcome::Counted(_) | TickOutcome::Skipped)
    }

    pub fn event(&self) -> Option<&TimerEvent> {
        match self {
            TickOutcome::Counted(event) | TickOutcome::Finished(event) => Some(event),
            TickOutcome::Skipped | TickOutcome::Cancelled => None,
        }
    }
}

/// Serialisable view of the engine for status output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub remaining_seconds: u32,
    pub display: String,
}

impl From<&TimerState> for TimerSnapshot {
    fn from(state: &TimerState) -> Self {
        Self {
            phase: state.phase,
            remaining_seconds: state.remaining_seconds,
            display: state.display.clone(),
        }
    }
}
