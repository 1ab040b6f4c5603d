//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown;

pub use countdown::{countdown_task, spawn_countdown};
