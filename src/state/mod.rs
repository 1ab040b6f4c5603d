//! State management module
//!
//! This module contains the timer state and the shared service state.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, ControlError, EngineSlot, Notice, ServiceEngine, TICK_PERIOD};
pub use timer_state::{TimerPhase, TimerState};
