//! Temporizador - a volume-gated countdown timer
//!
//! This is the main entry point for the temporizador server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use temporizador::{
    api::create_router,
    config::{Config, VolumeSource},
    controller::CountdownController,
    services::{SystemFeedbackPlayer, VolumeCell},
    state::AppState,
    tasks::{countdown_driver_task, volume_monitor_task, IntervalTickScheduler},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("temporizador={},tower_http=info", config.log_level()))
        .init();

    let timer_config = config.timer_config()?;

    info!("Starting temporizador server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, duration={}s, volume={:?}",
        config.host, config.port, timer_config.duration_seconds, config.volume_source
    );

    // Wire the controller to its collaborators
    let volume = VolumeCell::new();
    let (scheduler, ticks) = IntervalTickScheduler::new();
    let controller = CountdownController::new(
        timer_config,
        Box::new(volume.clone()),
        Box::new(SystemFeedbackPlayer::new()),
        Box::new(scheduler),
    );

    let state = Arc::new(AppState::new(
        controller,
        volume,
        config.volume_source,
        config.port,
        config.host.clone(),
    ));

    // Feed ticks into the controller
    let driver_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_driver_task(driver_state, ticks).await;
    });

    if config.volume_source == VolumeSource::System {
        let monitor_state = Arc::clone(&state);
        tokio::spawn(async move {
            volume_monitor_task(monitor_state).await;
        });
    }

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start                   - Arm the countdown");
    info!("  POST /pause                   - Pause the countdown");
    info!("  POST /resume                  - Resume the countdown");
    info!("  POST /cancel                  - Cancel and restore the full duration");
    info!("  POST /reset                   - Clear a completed countdown");
    info!("  PUT  /settings/feedback-mode  - Toggle a feedback mode");
    info!("  PUT  /settings/sound          - Select the completion sound");
    info!("  PUT  /settings/vibration      - Select the vibration pattern");
    info!("  PUT  /volume                  - Set the volume (manual source only)");
    info!("  GET  /status                  - Current countdown and server status");
    info!("  GET  /health                  - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
