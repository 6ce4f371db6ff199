//! Temporizador - a volume-gated countdown timer
//!
//! The countdown only starts once the output volume has been turned all the
//! way up, then signals completion with a sound, a vibration or both. The
//! state machine lives in [`controller`] and is independent of any UI; the
//! remaining modules host it behind a small HTTP API.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use controller::{CountdownController, TimerConfig};
pub use error::{AppError, TransitionError, VolumeReadError};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
