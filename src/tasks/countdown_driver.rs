//! Countdown driver background task

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::{controller::TickEvent, state::AppState};

/// Background task that feeds tick events into the controller, one at a time
pub async fn countdown_driver_task(
    state: Arc<AppState>,
    mut ticks: mpsc::UnboundedReceiver<TickEvent>,
) {
    info!("Starting countdown driver task");

    while let Some(event) = ticks.recv().await {
        if let Err(e) = state.handle_tick(event) {
            error!("Failed to deliver tick {}: {}", event.id, e);
        }
    }

    info!("Tick channel closed, countdown driver stopped");
}
