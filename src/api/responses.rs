//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    engine::{TimerEvent, TimerSnapshot},
    input::KeyVerdict,
    state::Notice,
};

/// Body of `POST /timer/display`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayRequest {
    pub text: String,
}

/// Body of `POST /timer/key`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyRequest {
    pub key: String,
}

/// Optional body of `POST /timer/start`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartRequest {
    pub text: Option<String>,
}

/// Response for timer transitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<TimerEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerSnapshot>,
}

impl ApiResponse {
    pub fn new(status: &str, message: String, event: Option<TimerEvent>, timer: Option<TimerSnapshot>) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            event,
            timer,
        }
    }

    /// Transition accepted
    pub fn ok(message: String, event: TimerEvent, timer: Option<TimerSnapshot>) -> Self {
        Self::new("ok", message, Some(event), timer)
    }

    /// Transition refused, `message` is the user notice
    pub fn error(message: String, timer: Option<TimerSnapshot>) -> Self {
        Self::new("error", message, None, timer)
    }
}

/// Masked display text and where to put the caret
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayResponse {
    pub display: String,
    pub caret: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyResponse {
    pub key: String,
    pub verdict: KeyVerdict,
    pub accepted: bool,
}

/// Status response with timer and alert information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub alert_sound: String,
    pub cached_assets: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
    /// Time's-up notice of the most recent completed countdown
    pub last_notice: Option<Notice>,
}

/// Keys the edit field lets through, for filtering on the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyRuleResponse {
    /// Any single ASCII digit is accepted
    pub digits: bool,
    pub editing_keys: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
