//! System volume monitor background task

use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::interval;
use tracing::{info, warn};

use crate::{
    error::VolumeReadError,
    services::read_system_volume,
    state::{AppState, Phase},
};

/// How often the system volume is sampled while arming
pub const VOLUME_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Background task that keeps the shared volume reading fresh from the
/// default audio sink while the countdown is arming.
pub async fn volume_monitor_task(state: Arc<AppState>) {
    monitor_volume(state, read_system_volume).await;
}

/// Poll `read` every [`VOLUME_POLL_INTERVAL`] while the countdown is arming.
/// Outside of arming the reading is cleared and `read` is not called, so a
/// stale maximum never starts a later run.
pub async fn monitor_volume<F, Fut>(state: Arc<AppState>, mut read: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<f32, VolumeReadError>>,
{
    info!("Starting volume monitor task");

    let mut interval = interval(VOLUME_POLL_INTERVAL);
    let mut last_error: Option<String> = None;

    loop {
        interval.tick().await;

        if state.phase() != Phase::Arming {
            state.volume.set(None);
            continue;
        }

        match read().await {
            Ok(level) => {
                state.volume.set(Some(level));
                if last_error.take().is_some() {
                    info!("Volume readings restored");
                }
            }
            Err(e) => {
                state.volume.set(None);
                // Log each distinct failure once
                let message = e.to_string();
                if last_error.as_deref() != Some(message.as_str()) {
                    warn!("Failed to read system volume: {}", message);
                    last_error = Some(message);
                }
            }
        }
    }
}
