//! Completion feedback on a desktop host

use std::io::Write;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::{
    controller::{FeedbackPlayer, VibrationPattern},
    state::SoundVariant,
};

const SOUND_DEFAULT: &str = "/usr/share/sounds/freedesktop/stereo/complete.oga";
const SOUND_ALTERNATIVE: &str = "/usr/share/sounds/freedesktop/stereo/bell.oga";

/// Plays sounds with `paplay` and renders vibration as a terminal bell on
/// stderr.
/// Must be used from inside a tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct SystemFeedbackPlayer;

impl SystemFeedbackPlayer {
    pub fn new() -> Self {
        Self
    }

    pub fn sound_path(variant: SoundVariant) -> &'static str {
        match variant {
            SoundVariant::Default => SOUND_DEFAULT,
            SoundVariant::Alternative => SOUND_ALTERNATIVE,
        }
    }

    fn spawn_sound(&self, variant: SoundVariant) {
        let path = Self::sound_path(variant);
        debug!("Playing {} (system sound {})", path, variant.system_sound_id());

        // The child keeps running after the handle is dropped
        if let Err(e) = Command::new("paplay").arg(path).spawn() {
            warn!("Failed to play completion sound: {}", e);
        }
    }

    fn pulse(&self, pattern: VibrationPattern) {
        match pattern {
            VibrationPattern::Short => info!("Vibration pulse"),
            VibrationPattern::HeavyBurst => debug!("Heavy vibration pulse"),
        }

        // stdout carries the log output
        if let Err(e) = ring_bell(&mut std::io::stderr()) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }
}

fn ring_bell(out: &mut impl Write) -> std::io::Result<()> {
    out.write_all(b"\x07")?;
    out.flush()
}

impl FeedbackPlayer for SystemFeedbackPlayer {
    fn play_sound(&self, variant: SoundVariant) {
        self.spawn_sound(variant);
    }

    fn vibrate(&self, pattern: VibrationPattern) {
        self.pulse(pattern);
    }

    fn play_sound_and_vibrate(&self, variant: SoundVariant) {
        self.spawn_sound(variant);
        self.pulse(VibrationPattern::Short);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bell_is_a_single_bel_byte() {
        let mut out = Vec::new();
        ring_bell(&mut out).unwrap();
        assert_eq!(out, b"\x07");
    }
}
