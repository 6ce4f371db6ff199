//! HTTP API module
//!
//! The display layer and settings surface of the timer: endpoint handlers
//! and the request/response structures they exchange.

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
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/resume", post(resume_handler))
        .route("/cancel", post(cancel_handler))
        .route("/reset", post(reset_handler))
        .route("/settings/feedback-mode", put(feedback_mode_handler))
        .route("/settings/sound", put(sound_handler))
        .route("/settings/vibration", put(vibration_handler))
        .route("/volume", put(volume_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
