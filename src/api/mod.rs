//! HTTP API module
//!
//! Control endpoints for the timer plus the cache-first asset fallback.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer/display", post(display_handler))
        .route("/timer/key", post(key_handler))
        .route("/timer/keys", get(key_rule_handler))
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/resume", post(resume_handler))
        .route("/timer/stop", post(stop_handler))
        .route("/timer/status", get(status_handler))
        .route("/alert-sound", put(alert_sound_handler))
        .route("/health", get(health_handler))
        .fallback(asset_handler)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
