//! Countdown state structure and the display model derived from it

use serde::{Deserialize, Serialize};

use super::FeedbackSettings;

/// Phase of the countdown state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Not started; full duration shown
    Idle,
    /// Waiting for the output volume to reach maximum
    Arming,
    Running,
    Paused,
    /// Countdown reached zero, waiting for a reset
    Completed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Arming => "arming",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Completed => "completed",
        }
    }

    /// Phases that own a live tick source
    pub fn is_ticking(&self) -> bool {
        matches!(self, Phase::Arming | Phase::Running | Phase::Paused)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remaining time and phase of a single countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    pub remaining_seconds: u32,
    pub phase: Phase,
}

impl CountdownState {
    /// Create an idle state showing the full duration
    pub fn new(duration_seconds: u32) -> Self {
        Self {
            remaining_seconds: duration_seconds,
            phase: Phase::Idle,
        }
    }

    /// Remaining time as zero-padded `MM:SS`
    pub fn formatted(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }
}

/// Format seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_mm_ss(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Buttons the display layer should render for a phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonLayout {
    pub primary_label: &'static str,
    pub primary_color: &'static str,
    pub secondary_label: Option<&'static str>,
    pub secondary_color: Option<&'static str>,
}

impl ButtonLayout {
    pub fn for_phase(phase: Phase) -> Self {
        let (secondary_label, secondary_color) = match phase {
            Phase::Running => (Some("Pause"), Some("yellow")),
            Phase::Paused => (Some("Resume"), Some("green")),
            _ => (None, None),
        };

        if phase.is_ticking() {
            Self {
                primary_label: "Cancel",
                primary_color: "red",
                secondary_label,
                secondary_color,
            }
        } else {
            Self {
                primary_label: "Start",
                primary_color: "orange",
                secondary_label,
                secondary_color,
            }
        }
    }
}

/// Everything the display layer observes after each state change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountdownSnapshot {
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub duration_seconds: u32,
    pub display: String,
    pub buttons: ButtonLayout,
    /// Shown while waiting for the volume gate
    pub message: Option<String>,
    pub settings: FeedbackSettings,
}

impl CountdownSnapshot {
    pub fn new(state: &CountdownState, duration_seconds: u32, settings: FeedbackSettings) -> Self {
        let message = (state.phase == Phase::Arming)
            .then(|| "Configured. Waiting for maximum volume to start".to_string());

        Self {
            phase: state.phase,
            remaining_seconds: state.remaining_seconds,
            duration_seconds,
            display: state.formatted(),
            buttons: ButtonLayout::for_phase(state.phase),
            message,
            settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds_zero_padded() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(10), "00:10");
        assert_eq!(format_mm_ss(600), "10:00");
        assert_eq!(format_mm_ss(61), "01:01");
    }

    #[test]
    fn buttons_follow_phase() {
        assert_eq!(ButtonLayout::for_phase(Phase::Idle).primary_label, "Start");
        assert_eq!(ButtonLayout::for_phase(Phase::Completed).primary_label, "Start");
        assert_eq!(ButtonLayout::for_phase(Phase::Arming).primary_label, "Cancel");
        assert_eq!(ButtonLayout::for_phase(Phase::Arming).secondary_label, None);

        let running = ButtonLayout::for_phase(Phase::Running);
        assert_eq!(running.primary_label, "Cancel");
        assert_eq!(running.secondary_label, Some("Pause"));

        let paused = ButtonLayout::for_phase(Phase::Paused);
        assert_eq!(paused.primary_label, "Cancel");
        assert_eq!(paused.secondary_label, Some("Resume"));
    }

    #[test]
    fn arming_snapshot_carries_waiting_message() {
        let mut state = CountdownState::new(10);
        let idle = CountdownSnapshot::new(&state, 10, FeedbackSettings::default());
        assert!(idle.message.is_none());
        assert_eq!(idle.display, "00:10");

        state.phase = Phase::Arming;
        let arming = CountdownSnapshot::new(&state, 10, FeedbackSettings::default());
        assert!(arming.message.is_some());
    }
}
