//! Main application state management

use std::{sync::Mutex, time::Instant};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::info;

use super::{CountdownSnapshot, FeedbackMode, Phase, SoundVariant, VibrationVariant};
use crate::{
    config::VolumeSource,
    controller::{CountdownController, TickEvent},
    error::{AppError, TransitionError},
    services::VolumeCell,
};

/// Shared application state. Every controller call goes through one mutex,
/// which keeps commands and ticks mutually exclusive.
#[derive(Debug)]
pub struct AppState {
    controller: Mutex<CountdownController>,
    /// Latest volume reading handed to the controller
    pub volume: VolumeCell,
    pub volume_source: VolumeSource,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Snapshot published after every change
    updates_rx: watch::Receiver<CountdownSnapshot>,
}

impl AppState {
    pub fn new(
        controller: CountdownController,
        volume: VolumeCell,
        volume_source: VolumeSource,
        port: u16,
        host: String,
    ) -> Self {
        let updates_rx = controller.subscribe();

        Self {
            controller: Mutex::new(controller),
            volume,
            volume_source,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            updates_rx,
        }
    }

    /// Run a controller command and record it as the last action
    pub fn apply<F>(&self, action: &str, command: F) -> Result<CountdownSnapshot, AppError>
    where
        F: FnOnce(&mut CountdownController) -> Result<(), TransitionError>,
    {
        let mut controller = self
            .controller
            .lock()
            .map_err(|_| AppError::LockPoisoned("countdown controller"))?;

        command(&mut *controller)?;
        let snapshot = controller.snapshot();
        drop(controller);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    pub fn start(&self) -> Result<CountdownSnapshot, AppError> {
        self.apply("start", CountdownController::begin)
    }

    pub fn pause(&self) -> Result<CountdownSnapshot, AppError> {
        self.apply("pause", CountdownController::pause)
    }

    pub fn resume(&self) -> Result<CountdownSnapshot, AppError> {
        self.apply("resume", CountdownController::resume)
    }

    pub fn cancel(&self) -> Result<CountdownSnapshot, AppError> {
        self.apply("cancel", CountdownController::cancel)
    }

    pub fn reset(&self) -> Result<CountdownSnapshot, AppError> {
        self.apply("reset", CountdownController::reset)
    }

    pub fn update_feedback_mode(
        &self,
        mode: FeedbackMode,
        enabled: bool,
    ) -> Result<CountdownSnapshot, AppError> {
        self.apply("feedback-mode", |controller| {
            controller.update_feedback_mode(mode, enabled);
            Ok(())
        })
    }

    pub fn set_sound_variant(&self, variant: SoundVariant) -> Result<CountdownSnapshot, AppError> {
        self.apply("sound", |controller| {
            controller.set_sound_variant(variant);
            Ok(())
        })
    }

    pub fn set_vibration_variant(
        &self,
        variant: VibrationVariant,
    ) -> Result<CountdownSnapshot, AppError> {
        self.apply("vibration", |controller| {
            controller.set_vibration_variant(variant);
            Ok(())
        })
    }

    /// Feed a tick from a tick source into the controller
    pub fn handle_tick(&self, event: TickEvent) -> Result<(), AppError> {
        let mut controller = self
            .controller
            .lock()
            .map_err(|_| AppError::LockPoisoned("countdown controller"))?;
        controller.handle_tick(event);
        Ok(())
    }

    /// Store a volume level coming from the API
    pub fn set_manual_volume(&self, level: f32) -> Result<(), AppError> {
        if self.volume_source != VolumeSource::Manual {
            return Err(AppError::ManualVolumeDisabled);
        }
        if !(0.0..=1.0).contains(&level) {
            return Err(AppError::VolumeOutOfRange(level));
        }

        info!("Manual volume set to {:.2}", level);
        self.volume.set(Some(level));
        Ok(())
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> CountdownSnapshot {
        self.updates_rx.borrow().clone()
    }

    pub fn phase(&self) -> Phase {
        self.updates_rx.borrow().phase
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<CountdownSnapshot> {
        self.updates_rx.clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
