mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::RecordingPlayer;
use temporizador::{
    config::VolumeSource,
    controller::{ManualTickScheduler, TickKind},
    create_router,
    services::VolumeCell,
    AppState, CountdownController, TimerConfig,
};

struct TestApp {
    router: Router,
    state: Arc<AppState>,
    ticks: ManualTickScheduler,
    player: RecordingPlayer,
}

impl TestApp {
    fn new(duration_seconds: u32, volume_source: VolumeSource) -> Self {
        let volume = VolumeCell::new();
        let ticks = ManualTickScheduler::new();
        let player = RecordingPlayer::default();
        let controller = CountdownController::new(
            TimerConfig::new(duration_seconds),
            Box::new(volume.clone()),
            Box::new(player.clone()),
            Box::new(ticks.clone()),
        );
        let state = Arc::new(AppState::new(
            controller,
            volume,
            volume_source,
            20554,
            "127.0.0.1".to_string(),
        ));

        Self {
            router: create_router(Arc::clone(&state)),
            state,
            ticks,
            player,
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn tick(&self) {
        let event = self.ticks.next_event(TickKind::Countdown).unwrap();
        self.state.handle_tick(event).unwrap();
    }
}

#[tokio::test]
async fn countdown_is_driven_through_the_api() {
    let app = TestApp::new(10, VolumeSource::Manual);

    let (status, body) = app.send("POST", "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countdown"]["phase"], "arming");
    assert_eq!(body["countdown"]["buttons"]["primary_label"], "Cancel");

    let (status, _) = app.send("PUT", "/volume", Some(json!({ "level": 1.0 }))).await;
    assert_eq!(status, StatusCode::OK);
    app.tick();
    app.tick();

    let (status, body) = app.send("POST", "/pause", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countdown"]["phase"], "paused");
    assert_eq!(body["countdown"]["display"], "00:09");
    assert_eq!(body["countdown"]["buttons"]["secondary_label"], "Resume");

    let (status, body) = app.send("POST", "/pause", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "cannot pause while paused");
    assert_eq!(body["countdown"]["phase"], "paused");

    let (status, _) = app.send("POST", "/resume", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send("POST", "/cancel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countdown"]["phase"], "idle");
    assert_eq!(body["countdown"]["remaining_seconds"], 10);
    assert!(app.ticks.live().is_empty());
}

#[tokio::test]
async fn start_after_completion_rearms() {
    let app = TestApp::new(1, VolumeSource::Manual);
    app.send("POST", "/start", None).await;
    app.state.set_manual_volume(1.0).unwrap();
    app.tick();
    app.tick();

    let (_, status) = app.send("GET", "/status", None).await;
    assert_eq!(status["countdown"]["phase"], "completed");
    assert_eq!(status["countdown"]["buttons"]["primary_label"], "Start");
    assert_eq!(app.player.calls().len(), 1);

    let (status, body) = app.send("POST", "/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countdown"]["phase"], "arming");
    assert_eq!(body["countdown"]["remaining_seconds"], 1);
}

#[tokio::test]
async fn cancel_during_heavy_burst_returns_to_idle() {
    let app = TestApp::new(1, VolumeSource::Manual);
    app.send("PUT", "/settings/feedback-mode", Some(json!({ "mode": "vibrate_only", "enabled": true })))
        .await;
    app.send("PUT", "/settings/vibration", Some(json!({ "variant": "heavy" })))
        .await;
    app.send("POST", "/start", None).await;
    app.state.set_manual_volume(1.0).unwrap();
    app.tick();
    app.tick();
    assert_eq!(app.ticks.live_count(TickKind::Pulse), 1);

    let (status, body) = app.send("POST", "/cancel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countdown"]["phase"], "idle");
    assert_eq!(body["countdown"]["remaining_seconds"], 1);
    assert!(app.ticks.live().is_empty());
    assert_eq!(app.player.calls().len(), 1);
}

#[tokio::test]
async fn reset_requires_a_completed_countdown() {
    let app = TestApp::new(5, VolumeSource::Manual);
    let (status, body) = app.send("POST", "/reset", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "cannot reset while idle");
}

#[tokio::test]
async fn manual_volume_is_validated() {
    let system = TestApp::new(5, VolumeSource::System);
    let (status, body) = system.send("PUT", "/volume", Some(json!({ "level": 1.0 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");

    let manual = TestApp::new(5, VolumeSource::Manual);
    let (status, _) = manual.send("PUT", "/volume", Some(json!({ "level": 1.5 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(manual.state.volume.get(), None);
}

#[tokio::test]
async fn settings_endpoints_update_feedback() {
    let app = TestApp::new(5, VolumeSource::Manual);

    let (status, body) = app
        .send(
            "PUT",
            "/settings/feedback-mode",
            Some(json!({ "mode": "vibrate_only", "enabled": true })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countdown"]["settings"]["mode"], "vibrate_only");

    let (_, body) = app
        .send(
            "PUT",
            "/settings/feedback-mode",
            Some(json!({ "mode": "vibrate_only", "enabled": false })),
        )
        .await;
    assert_eq!(body["countdown"]["settings"]["mode"], "vibrate_and_sound");

    let (_, body) = app
        .send("PUT", "/settings/sound", Some(json!({ "variant": "alternative" })))
        .await;
    assert_eq!(body["countdown"]["settings"]["sound"], "alternative");

    let (_, body) = app
        .send("PUT", "/settings/vibration", Some(json!({ "variant": "heavy" })))
        .await;
    assert_eq!(body["countdown"]["settings"]["vibration"], "heavy");
}

#[tokio::test]
async fn status_reports_last_action_and_source() {
    let app = TestApp::new(600, VolumeSource::Manual);
    app.send("POST", "/start", None).await;

    let (status, body) = app.send("GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["last_action"], "start");
    assert_eq!(body["volume_source"], "manual");
    assert_eq!(body["countdown"]["display"], "10:00");
    assert!(body["volume"].is_null());

    let (status, body) = app.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
