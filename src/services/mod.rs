//! Device service module
//!
//! This module contains the host side implementations of the controller's
//! collaborators: reading the system output volume and playing feedback.

pub mod feedback;
pub mod volume;

// Re-export main types
pub use feedback::SystemFeedbackPlayer;
pub use volume::{parse_wpctl_volume, read_system_volume, VolumeCell};
