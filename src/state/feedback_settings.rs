//! Completion feedback settings

use serde::{Deserialize, Serialize};

/// How completion is signalled. Exactly one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackMode {
    #[default]
    VibrateAndSound,
    VibrateOnly,
    SoundOnly,
}

impl FeedbackMode {
    pub const ALL: [FeedbackMode; 3] = [
        FeedbackMode::VibrateAndSound,
        FeedbackMode::VibrateOnly,
        FeedbackMode::SoundOnly,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundVariant {
    #[default]
    Default,
    Alternative,
}

impl SoundVariant {
    /// Platform alert sound id for the variant
    pub fn system_sound_id(&self) -> u32 {
        match self {
            SoundVariant::Default => 1005,
            SoundVariant::Alternative => 1006,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VibrationVariant {
    /// One short pulse
    #[default]
    Default,
    /// A two second burst of pulses
    Heavy,
}

/// User selectable feedback, read on every completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedbackSettings {
    pub mode: FeedbackMode,
    pub sound: SoundVariant,
    pub vibration: VibrationVariant,
}

impl FeedbackSettings {
    /// Apply a settings toggle for one mode.
    ///
    /// Turning a mode on makes it the only active one. Turning off the active
    /// mode falls back to `VibrateAndSound`, so a mode is always selected.
    /// Turning off a mode that is not active is a no-op.
    pub fn update_mode(&mut self, mode: FeedbackMode, enabled: bool) {
        if enabled {
            self.mode = mode;
        } else if self.mode == mode {
            self.mode = FeedbackMode::VibrateAndSound;
        }
    }

    /// Whether a mode's toggle should render as on
    pub fn is_enabled(&self, mode: FeedbackMode) -> bool {
        self.mode == mode
    }
}
