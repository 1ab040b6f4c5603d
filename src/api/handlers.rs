//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use crate::{
    engine::TimerEvent,
    input,
    notify::AlertSound,
    state::{AppState, ControlError},
};
use super::responses::{
    ApiResponse, DisplayRequest, DisplayResponse, HealthResponse, KeyRequest, KeyResponse,
    KeyRuleResponse, StartRequest, StatusResponse,
};

/// Header carrying the label of an uploaded alert sound
pub const SOUND_NAME_HEADER: &str = "x-sound-name";

type ControlResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Map a transition result onto a response
fn control_response(state: &AppState, action: &str, result: Result<TimerEvent, ControlError>) -> ControlResult {
    let snapshot = state.snapshot().ok();

    match result {
        Ok(event) => {
            info!("{} endpoint called", action);
            Ok(Json(ApiResponse::ok(format!("Timer {}", action), event, snapshot)))
        }
        Err(ControlError::Timer(e)) => {
            let status = if e.is_validation() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::CONFLICT
            };
            warn!("Rejected {}: {}", action, e);
            Err((status, Json(ApiResponse::error(e.notice(), snapshot))))
        }
        Err(ControlError::Internal(e)) => {
            error!("Failed to {} timer: {}", action, e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ApiResponse::error(e, snapshot))))
        }
    }
}

/// Handle POST /timer/display - Mask the edit buffer
pub async fn display_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DisplayRequest>,
) -> Result<Json<DisplayResponse>, (StatusCode, Json<ApiResponse>)> {
    match state.edit_display(&request.text) {
        Ok(masked) => Ok(Json(DisplayResponse {
            display: masked.text,
            caret: masked.caret,
        })),
        Err(ControlError::Timer(e)) => Err((StatusCode::CONFLICT, Json(ApiResponse::error(e.notice(), None)))),
        Err(ControlError::Internal(e)) => {
            error!("Failed to edit display: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ApiResponse::error(e, None))))
        }
    }
}

/// Handle POST /timer/key - Key-down filter
pub async fn key_handler(Json(request): Json<KeyRequest>) -> Json<KeyResponse> {
    let verdict = input::validate_input(&request.key);
    Json(KeyResponse {
        accepted: verdict.is_accepted(),
        key: request.key,
        verdict,
    })
}

/// Handle GET /timer/keys - Key filter rule, so clients can suppress keys synchronously
pub async fn key_rule_handler() -> Json<KeyRuleResponse> {
    Json(KeyRuleResponse {
        digits: true,
        editing_keys: input::EDITING_KEYS.iter().map(|key| key.to_string()).collect(),
    })
}

/// Handle POST /timer/start - Start from the given text or the display
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    request: Option<Json<StartRequest>>,
) -> ControlResult {
    let request = request.map(|Json(request)| request).unwrap_or_default();
    let result = state.start(request.text.as_deref());
    control_response(&state, "started", result)
}

/// Handle POST /timer/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ControlResult {
    let result = state.pause();
    control_response(&state, "paused", result)
}

/// Handle POST /timer/resume
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> ControlResult {
    let result = state.resume();
    control_response(&state, "resumed", result)
}

/// Handle POST /timer/stop
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> ControlResult {
    let result = state.stop();
    control_response(&state, "stopped", result)
}

/// Handle GET /timer/status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = state.snapshot().map_err(|e| {
        error!("Failed to get timer state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let alert_sound = state.alert_sound_name().map_err(|e| {
        error!("Failed to get alert sound: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        alert_sound,
        cached_assets: state.assets.len(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
        last_notice: state.get_last_notice(),
    }))
}

/// Handle PUT /alert-sound - Replace the alert sound with the raw request body
pub async fn alert_sound_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, StatusCode> {
    if body.is_empty() {
        warn!("Rejected empty alert sound upload");
        return Err(StatusCode::BAD_REQUEST);
    }

    let name = headers
        .get(SOUND_NAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("custom");

    state.set_alert_sound(AlertSound::new(name, body.to_vec())).map_err(|e| {
        error!("Failed to set alert sound: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Serve static assets cache-first
pub async fn asset_handler(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    match state.assets.respond(uri.path()).await {
        Ok(asset) => (
            [(header::CONTENT_TYPE, asset.content_type)],
            Body::from(asset.body.to_vec()),
        )
            .into_response(),
        Err(e) => {
            warn!("Asset {} unavailable: {}", uri.path(), e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
