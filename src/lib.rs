//! Meditation Timer - a countdown timer service
//!
//! A duration typed into a masked `HH:MM:SS` field is counted down one
//! second per tick and an alert sound plays when it reaches zero. The page's
//! static assets are served from an install-once offline cache.

pub mod api;
pub mod cache;
pub mod codec;
pub mod config;
pub mod engine;
pub mod input;
pub mod notify;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use engine::{TimerEngine, TimerError, TimerEvent};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
