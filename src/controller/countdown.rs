//! Countdown controller: volume-gated arming, countdown and completion feedback
//!
//! ```text
//! Idle --begin--> Arming --tick @ max volume--> Running --tick to 0--> Completed
//!                   |                           |    ^                     |
//!                   |                       pause    resume          reset/cancel
//!                   |                           v    |                     |
//!                   +--------cancel------------ Paused                     v
//!                                   (cancel from any of the three) --> Idle
//! ```
//!
//! `begin` from Completed clears the finished run first, so a heavy
//! vibration burst never outlives a new start or a cancel.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use super::{
    collaborators::{FeedbackPlayer, VibrationPattern, VolumeReader, MAX_VOLUME},
    ticks::{TickEvent, TickHandle, TickId, TickKind, TickScheduler},
};
use crate::{
    error::{Operation, TransitionError},
    state::{
        CountdownSnapshot, CountdownState, FeedbackMode, FeedbackSettings, Phase, SoundVariant,
        VibrationVariant,
    },
};

/// Time between two heavy vibration pulses
pub const HEAVY_BURST_INTERVAL: Duration = Duration::from_millis(50);

/// Total length of a heavy vibration burst
pub const HEAVY_BURST_DURATION: Duration = Duration::from_secs(2);

/// Pulses in one heavy burst, the first one fired at completion
pub const HEAVY_BURST_PULSES: u32 =
    (HEAVY_BURST_DURATION.as_millis() / HEAVY_BURST_INTERVAL.as_millis()) as u32;

/// Per-run countdown configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub duration_seconds: u32,
    pub tick_interval: Duration,
}

impl TimerConfig {
    pub const DEFAULT_DURATION_SECONDS: u32 = 10;

    pub fn new(duration_seconds: u32) -> Self {
        Self {
            duration_seconds,
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DURATION_SECONDS)
    }
}

#[derive(Debug)]
struct HeavyBurst {
    handle: TickHandle,
    pulses_left: u32,
}

/// Owns the countdown state and every tick source it needs.
///
/// Operations must be serialized by the caller; the host keeps the
/// controller behind a mutex and feeds ticks from a single task.
pub struct CountdownController {
    config: TimerConfig,
    state: CountdownState,
    settings: FeedbackSettings,
    volume: Box<dyn VolumeReader>,
    feedback: Box<dyn FeedbackPlayer>,
    scheduler: Box<dyn TickScheduler>,
    ticker: Option<TickHandle>,
    burst: Option<HeavyBurst>,
    next_tick_id: u64,
    updates_tx: watch::Sender<CountdownSnapshot>,
}

impl CountdownController {
    pub fn new(
        config: TimerConfig,
        volume: Box<dyn VolumeReader>,
        feedback: Box<dyn FeedbackPlayer>,
        scheduler: Box<dyn TickScheduler>,
    ) -> Self {
        let state = CountdownState::new(config.duration_seconds);
        let settings = FeedbackSettings::default();
        let (updates_tx, _) =
            watch::channel(CountdownSnapshot::new(&state, config.duration_seconds, settings));

        Self {
            config,
            state,
            settings,
            volume,
            feedback,
            scheduler,
            ticker: None,
            burst: None,
            next_tick_id: 0,
            updates_tx,
        }
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    pub fn settings(&self) -> FeedbackSettings {
        self.settings
    }

    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot::new(&self.state, self.config.duration_seconds, self.settings)
    }

    /// Receive a snapshot after every state or settings change
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.updates_tx.subscribe()
    }

    pub fn has_tick_source(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn burst_active(&self) -> bool {
        self.burst.is_some()
    }

    // Commands

    /// Idle or Completed -> Arming. Starts polling the volume once per tick.
    pub fn begin(&mut self) -> Result<(), TransitionError> {
        self.expect_phase(Operation::Begin, &[Phase::Idle, Phase::Completed])?;

        self.stop_burst();
        self.state.remaining_seconds = self.config.duration_seconds;
        self.ticker = Some(self.start_ticks(TickKind::Countdown, self.config.tick_interval));
        self.set_phase(Phase::Arming);
        Ok(())
    }

    /// Running -> Paused. The tick source keeps firing but is ignored.
    pub fn pause(&mut self) -> Result<(), TransitionError> {
        self.expect_phase(Operation::Pause, &[Phase::Running])?;
        self.set_phase(Phase::Paused);
        Ok(())
    }

    /// Paused -> Running
    pub fn resume(&mut self) -> Result<(), TransitionError> {
        self.expect_phase(Operation::Resume, &[Phase::Paused])?;
        self.set_phase(Phase::Running);
        Ok(())
    }

    /// Arming, Running, Paused or Completed -> Idle with the full duration
    /// restored. Stops a heavy burst still playing after completion.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        self.expect_phase(
            Operation::Cancel,
            &[Phase::Arming, Phase::Running, Phase::Paused, Phase::Completed],
        )?;

        self.ticker = None;
        self.stop_burst();
        self.state.remaining_seconds = self.config.duration_seconds;
        self.set_phase(Phase::Idle);
        Ok(())
    }

    /// Completed -> Idle with the full duration restored
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        self.expect_phase(Operation::Reset, &[Phase::Completed])?;

        self.stop_burst();
        self.state.remaining_seconds = self.config.duration_seconds;
        self.set_phase(Phase::Idle);
        Ok(())
    }

    /// Route a tick to `tick()` or `pulse()`, dropping ticks from sources
    /// that have already been released.
    pub fn handle_tick(&mut self, event: TickEvent) {
        match event.kind {
            TickKind::Countdown => {
                if self.ticker.as_ref().is_some_and(|t| t.owns(&event)) {
                    self.tick();
                } else {
                    debug!("Ignoring stale countdown tick {}", event.id);
                }
            }
            TickKind::Pulse => {
                if self.burst.as_ref().is_some_and(|b| b.handle.owns(&event)) {
                    self.pulse();
                } else {
                    debug!("Ignoring stale pulse tick {}", event.id);
                }
            }
        }
    }

    /// Advance the state machine by one tick interval
    pub fn tick(&mut self) {
        match self.state.phase {
            Phase::Arming => self.check_volume(),
            Phase::Running => {
                self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);
                debug!("Countdown tick, {}s remaining", self.state.remaining_seconds);

                if self.state.remaining_seconds == 0 {
                    self.complete();
                } else {
                    self.publish();
                }
            }
            Phase::Idle | Phase::Paused | Phase::Completed => {}
        }
    }

    /// Emit the next pulse of an active heavy burst
    pub fn pulse(&mut self) {
        let Some(burst) = self.burst.as_mut() else {
            return;
        };

        self.feedback.vibrate(VibrationPattern::HeavyBurst);
        burst.pulses_left = burst.pulses_left.saturating_sub(1);

        if burst.pulses_left == 0 {
            debug!("Heavy vibration burst finished");
            self.burst = None;
        }
    }

    // Settings

    pub fn update_feedback_mode(&mut self, mode: FeedbackMode, enabled: bool) {
        self.settings.update_mode(mode, enabled);
        info!("Feedback mode is now {:?}", self.settings.mode);
        self.publish();
    }

    pub fn set_sound_variant(&mut self, variant: SoundVariant) {
        self.settings.sound = variant;
        self.publish();
    }

    pub fn set_vibration_variant(&mut self, variant: VibrationVariant) {
        self.settings.vibration = variant;
        self.publish();
    }

    // Internals

    fn check_volume(&mut self) {
        // Read failures count as "not at maximum yet"; the reader logs them.
        let Ok(level) = self.volume.read_current_volume() else {
            return;
        };

        if level == MAX_VOLUME {
            info!("Maximum volume reached, starting countdown");
            self.ticker = None;
            self.ticker = Some(self.start_ticks(TickKind::Countdown, self.config.tick_interval));
            self.set_phase(Phase::Running);
        } else {
            debug!("Volume at {:.2}, still arming", level);
        }
    }

    fn complete(&mut self) {
        self.ticker = None;
        self.set_phase(Phase::Completed);
        self.dispatch_feedback();
    }

    fn dispatch_feedback(&mut self) {
        let settings = self.settings;
        info!("Countdown finished, signalling with {:?}", settings.mode);

        match settings.mode {
            FeedbackMode::VibrateAndSound => self.feedback.play_sound_and_vibrate(settings.sound),
            FeedbackMode::SoundOnly => self.feedback.play_sound(settings.sound),
            FeedbackMode::VibrateOnly => match settings.vibration {
                VibrationVariant::Default => self.feedback.vibrate(VibrationPattern::Short),
                VibrationVariant::Heavy => self.start_burst(),
            },
        }
    }

    fn start_burst(&mut self) {
        self.feedback.vibrate(VibrationPattern::HeavyBurst);

        let pulses_left = HEAVY_BURST_PULSES.saturating_sub(1);
        if pulses_left > 0 {
            let handle = self.start_ticks(TickKind::Pulse, HEAVY_BURST_INTERVAL);
            self.burst = Some(HeavyBurst { handle, pulses_left });
        }
    }

    fn stop_burst(&mut self) {
        if self.burst.take().is_some() {
            debug!("Heavy vibration burst stopped early");
        }
    }

    fn start_ticks(&mut self, kind: TickKind, period: Duration) -> TickHandle {
        self.next_tick_id += 1;
        self.scheduler.start(TickId(self.next_tick_id), kind, period)
    }

    fn expect_phase(&self, operation: Operation, allowed: &[Phase]) -> Result<(), TransitionError> {
        if allowed.contains(&self.state.phase) {
            Ok(())
        } else {
            debug!("Rejected {} while {}", operation, self.state.phase);
            Err(TransitionError::InvalidTransition {
                operation,
                phase: self.state.phase,
            })
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.state.phase != phase {
            info!("Countdown phase {} -> {}", self.state.phase, phase);
        }
        self.state.phase = phase;
        self.publish();
    }

    fn publish(&self) {
        self.updates_tx.send_replace(self.snapshot());
    }
}

impl std::fmt::Debug for CountdownController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("settings", &self.settings)
            .field("ticker", &self.ticker)
            .field("burst", &self.burst)
            .finish()
    }
}
