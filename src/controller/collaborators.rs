//! Contracts for the devices the controller talks to

use crate::{error::VolumeReadError, state::SoundVariant};

/// Output level the volume gate waits for
pub const MAX_VOLUME: f32 = 1.0;

/// Reads the current output volume
pub trait VolumeReader: Send {
    /// Current level in `0.0..=1.0`
    fn read_current_volume(&self) -> Result<f32, VolumeReadError>;
}

/// Vibration requested from the feedback player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibrationPattern {
    /// A single short pulse
    Short,
    /// One pulse of a heavy burst; the controller repeats it
    HeavyBurst,
}

/// Plays completion feedback. Every call is fire-and-forget.
pub trait FeedbackPlayer: Send {
    fn play_sound(&self, variant: SoundVariant);

    fn vibrate(&self, pattern: VibrationPattern);

    fn play_sound_and_vibrate(&self, variant: SoundVariant);
}
