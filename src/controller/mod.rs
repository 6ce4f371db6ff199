//! Countdown controller module
//!
//! Owns the countdown state machine together with the collaborator
//! contracts and tick sources it depends on. Nothing in here touches the
//! network, processes or the clock directly.

pub mod collaborators;
pub mod countdown;
pub mod ticks;

// Re-export main types
pub use collaborators::{FeedbackPlayer, VibrationPattern, VolumeReader, MAX_VOLUME};
pub use countdown::{CountdownController, TimerConfig, HEAVY_BURST_INTERVAL, HEAVY_BURST_PULSES};
pub use ticks::{ManualTickScheduler, TickEvent, TickHandle, TickId, TickKind, TickScheduler};
