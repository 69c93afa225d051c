//! End-to-end tests driving the HTTP router with a paused clock

use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{header, Request, StatusCode},
    Router,
};
use futures::{Stream, StreamExt};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

use reaction_nano::{
    create_router,
    game::{
        share::{DEFAULT_PRODUCT_NAME, DEFAULT_SHARE_ENDPOINT},
        DelayRange, ShareTarget,
    },
    tasks::delay_timer_task,
    AppState,
};

const PAGE_URL: &str = "https://nano.example/play";

/// Cue delay pinned to exactly two seconds
fn fixed_delay() -> DelayRange {
    DelayRange::new(2000, 2001).unwrap()
}

fn app(delays: DelayRange) -> Router {
    let (state, fired_rx) = AppState::new(
        20554,
        "127.0.0.1".to_string(),
        delays,
        ShareTarget::new(
            DEFAULT_PRODUCT_NAME.to_string(),
            PAGE_URL.to_string(),
            DEFAULT_SHARE_ENDPOINT.to_string(),
        ),
    );
    let state = Arc::new(state);
    tokio::spawn(delay_timer_task(Arc::clone(&state), fired_rx));
    create_router(state)
}

async fn call(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Read chunks until a complete `view` event arrives and return its data line
async fn next_view_event<S>(frames: &mut S) -> String
where
    S: Stream<Item = Result<Bytes, axum::Error>> + Unpin,
{
    let mut buffer = String::new();
    loop {
        let chunk = tokio::time::timeout(Duration::from_secs(5), frames.next())
            .await
            .expect("no view event within 5s")
            .expect("event stream ended")
            .unwrap();
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        while let Some(end) = buffer.find("\n\n") {
            let frame: String = buffer.drain(..end + 2).collect();
            if frame.lines().any(|line| line == "event: view") {
                if let Some(data) = frame.lines().find_map(|line| line.strip_prefix("data: ")) {
                    return data.to_string();
                }
            }
        }
    }
}

async fn state_of(app: &Router) -> String {
    let (_, body) = call(app, "GET", "/status").await;
    body["state"].as_str().unwrap().to_string()
}

#[tokio::test(start_paused = true)]
async fn full_round_reports_reaction_time() {
    let app = app(fixed_delay());

    let (status, body) = call(&app, "POST", "/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "applied");
    assert_eq!(body["state"], "waiting");
    assert_eq!(body["view"]["background"], "armed");

    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(state_of(&app).await, "ready");

    // 100ms already elapsed since the cue
    tokio::time::sleep(Duration::from_millis(150)).await;
    let (_, body) = call(&app, "POST", "/click").await;
    assert_eq!(body["state"], "result");
    assert_eq!(body["reaction_time_ms"], 250);
    assert_eq!(body["view"]["result_visible"], true);

    let (_, status) = call(&app, "GET", "/status").await;
    assert_eq!(status["stats"]["completed"], 1);
    assert_eq!(status["stats"]["best_ms"], 250);
    assert_eq!(status["last_action"], "click");
}

#[tokio::test(start_paused = true)]
async fn early_click_cancels_the_cue() {
    let app = app(DelayRange::default());

    call(&app, "POST", "/start").await;
    tokio::time::sleep(Duration::from_millis(1000)).await;

    let (_, body) = call(&app, "POST", "/click").await;
    assert_eq!(body["status"], "applied");
    assert_eq!(body["state"], "idle");
    assert_eq!(
        body["view"]["message"],
        "Too early! Wait for the color to turn green before clicking."
    );

    // Well past any scheduled cue, the game must still be idle
    tokio::time::sleep(Duration::from_millis(10_000)).await;
    assert_eq!(state_of(&app).await, "idle");

    let (_, status) = call(&app, "GET", "/status").await;
    assert_eq!(status["stats"]["early_clicks"], 1);
}

#[tokio::test(start_paused = true)]
async fn start_while_waiting_is_ignored() {
    let app = app(DelayRange::default());

    call(&app, "POST", "/start").await;
    let (_, body) = call(&app, "POST", "/start").await;

    assert_eq!(body["status"], "ignored");
    assert_eq!(body["state"], "waiting");
    let (_, status) = call(&app, "GET", "/status").await;
    assert_eq!(status["stats"]["attempts"], 1);
}

#[tokio::test(start_paused = true)]
async fn share_result_then_retry() {
    let app = app(fixed_delay());

    call(&app, "POST", "/start").await;
    tokio::time::sleep(Duration::from_millis(2312)).await;
    call(&app, "POST", "/click").await;

    let (status, body) = call(&app, "POST", "/share").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "applied");
    let intent_url = body["share"]["intent_url"].as_str().unwrap();
    assert!(intent_url.starts_with("https://twitter.com/intent/tweet?text=312%20ms%20on%20Reaction%20Nano!"));
    assert!(intent_url.ends_with("&url=https%3A%2F%2Fnano.example%2Fplay"));
    assert!(body["share"]["text"].as_str().unwrap().contains("312"));

    let (_, body) = call(&app, "POST", "/retry").await;
    assert_eq!(body["state"], "idle");
    assert_eq!(body["view"]["share"], Value::Null);
    assert_eq!(body["view"]["reaction_time_ms"], Value::Null);
    let (_, again) = call(&app, "POST", "/retry").await;
    assert_eq!(again["state"], "idle");
    assert_eq!(again["view"]["overlay_visible"], true);

    let (_, body) = call(&app, "POST", "/share").await;
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["share"], Value::Null);
}

#[tokio::test]
async fn clicks_while_idle_do_nothing() {
    let app = app(DelayRange::default());

    let (status, body) = call(&app, "POST", "/click").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["state"], "idle");
    assert_eq!(body["view"]["revision"], 1);
}

#[tokio::test]
async fn health_and_page_are_served() {
    let app = app(DelayRange::default());

    let (status, body) = call(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("game-container"));
}

#[tokio::test]
async fn event_stream_pushes_view_updates() {
    let app = app(DelayRange::default());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));

    let mut frames = Box::pin(response.into_body().into_data_stream());

    let first: Value = serde_json::from_str(&next_view_event(&mut frames).await).unwrap();
    assert_eq!(first["revision"], 1);
    assert_eq!(first["background"], "neutral");

    call(&app, "POST", "/start").await;

    let second: Value = serde_json::from_str(&next_view_event(&mut frames).await).unwrap();
    assert_eq!(second["revision"], 2);
    assert_eq!(second["background"], "armed");
    assert_eq!(second["overlay_visible"], false);
}
