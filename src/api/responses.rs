//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{CountdownSnapshot, FeedbackMode, SoundVariant, VibrationVariant};

/// API response structure for command and settings endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub countdown: CountdownSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, countdown: CountdownSnapshot) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            countdown,
        }
    }

    /// Create a success response
    pub fn ok(message: String, countdown: CountdownSnapshot) -> Self {
        Self::new("ok", message, countdown)
    }

    /// Create an error response
    pub fn error(message: String, countdown: CountdownSnapshot) -> Self {
        Self::new("error", message, countdown)
    }
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub countdown: CountdownSnapshot,
    pub volume: Option<f32>,
    pub volume_source: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body of `PUT /settings/feedback-mode`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FeedbackModeRequest {
    pub mode: FeedbackMode,
    pub enabled: bool,
}

/// Body of `PUT /settings/sound`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SoundRequest {
    pub variant: SoundVariant,
}

/// Body of `PUT /settings/vibration`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VibrationRequest {
    pub variant: VibrationVariant,
}

/// Body of `PUT /volume`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VolumeRequest {
    pub level: f32,
}
