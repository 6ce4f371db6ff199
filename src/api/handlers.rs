//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, info, warn};

use super::responses::{
    ApiResponse, FeedbackModeRequest, HealthResponse, SoundRequest, StatusResponse,
    VibrationRequest, VolumeRequest,
};
use crate::{
    config::VolumeSource,
    error::AppError,
    state::{AppState, CountdownSnapshot},
};

type ApiResult = Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)>;

/// Turn a state operation result into a response
fn respond(
    state: &AppState,
    result: Result<CountdownSnapshot, AppError>,
    message: &str,
) -> ApiResult {
    match result {
        Ok(snapshot) => {
            info!("{}", message);
            Ok(Json(ApiResponse::ok(message.to_string(), snapshot)))
        }
        Err(e) => {
            let status = match &e {
                AppError::Transition(_) | AppError::ManualVolumeDisabled => StatusCode::CONFLICT,
                AppError::VolumeOutOfRange(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AppError::LockPoisoned(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };

            if status.is_server_error() {
                error!("Request failed: {}", e);
            } else {
                warn!("Request rejected: {}", e);
            }

            Err((status, Json(ApiResponse::error(e.to_string(), state.snapshot()))))
        }
    }
}

/// Handle POST /start - Arm the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond(&state, state.start(), "Countdown armed, waiting for maximum volume")
}

/// Handle POST /pause - Pause a running countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond(&state, state.pause(), "Countdown paused")
}

/// Handle POST /resume - Resume a paused countdown
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond(&state, state.resume(), "Countdown resumed")
}

/// Handle POST /cancel - Cancel arming or counting
pub async fn cancel_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond(&state, state.cancel(), "Countdown cancelled")
}

/// Handle POST /reset - Clear a completed countdown
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    respond(&state, state.reset(), "Countdown reset")
}

/// Handle PUT /settings/feedback-mode - Toggle a feedback mode
pub async fn feedback_mode_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FeedbackModeRequest>,
) -> ApiResult {
    respond(
        &state,
        state.update_feedback_mode(request.mode, request.enabled),
        "Feedback mode updated",
    )
}

/// Handle PUT /settings/sound - Select the completion sound
pub async fn sound_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SoundRequest>,
) -> ApiResult {
    respond(&state, state.set_sound_variant(request.variant), "Sound updated")
}

/// Handle PUT /settings/vibration - Select the vibration pattern
pub async fn vibration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VibrationRequest>,
) -> ApiResult {
    respond(
        &state,
        state.set_vibration_variant(request.variant),
        "Vibration updated",
    )
}

/// Handle PUT /volume - Push a volume level in manual mode
pub async fn volume_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VolumeRequest>,
) -> ApiResult {
    let result = state
        .set_manual_volume(request.level)
        .map(|()| state.snapshot());
    respond(&state, result, "Volume updated")
}

/// Handle GET /status - Return the current countdown and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();
    let volume_source = match state.volume_source {
        VolumeSource::System => "system",
        VolumeSource::Manual => "manual",
    };

    Json(StatusResponse {
        countdown: state.snapshot(),
        volume: state.volume.get(),
        volume_source: volume_source.to_string(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
