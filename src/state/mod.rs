//! State management module
//!
//! This module contains the countdown and settings structures plus the
//! shared application state that serializes access to the controller.

pub mod app_state;
pub mod countdown_state;
pub mod feedback_settings;

// Re-export main types
pub use app_state::AppState;
pub use countdown_state::{format_mm_ss, ButtonLayout, CountdownSnapshot, CountdownState, Phase};
pub use feedback_settings::{FeedbackMode, FeedbackSettings, SoundVariant, VibrationVariant};
