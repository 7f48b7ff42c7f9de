//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use artjam_api::permissions::ModeratorList;
use artjam_api::routes;
use artjam_api::state::AppState;
use artjam_core::clock::Clock;
use artjam_core::id::ParticipantId;
use artjam_test_support::{FixedClock, RecordingNotifier};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Moderator allowed to end rounds in every test app.
pub const MODERATOR: &str = "u-mod";

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Build the full app router with a recording notifier and a deterministic
/// clock. Uses the same route structure as `main.rs`.
pub fn build_test_app() -> (Router, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let moderators: HashSet<ParticipantId> = [ParticipantId::new(MODERATOR)].into_iter().collect();
    let app_state = AppState::new(
        fixed_clock(),
        notifier.clone(),
        Arc::new(ModeratorList::new(moderators)),
    );

    let app = Router::new()
        .merge(routes::health::router())
        .nest(
            "/api/v1/channels/{channel_id}/round",
            routes::rounds::router(),
        )
        .with_state(app_state);

    (app, notifier)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with an empty JSON object body.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    post_json(app, uri, &serde_json::json!({})).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Path of a round endpoint for `channel`.
pub fn round_uri(channel: &str, action: &str) -> String {
    format!("/api/v1/channels/{channel}/round/{action}")
}

/// Configures and starts a round in `channel`.
pub async fn start_round(app: &Router, channel: &str, topic: &str, minutes: u32) {
    let (status, _) = post_json(
        app.clone(),
        &round_uri(channel, "topic"),
        &serde_json::json!({ "topic": topic }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_json(
        app.clone(),
        &round_uri(channel, "time-limit"),
        &serde_json::json!({ "minutes": minutes }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_empty(app.clone(), &round_uri(channel, "start")).await;
    assert_eq!(status, StatusCode::OK);
}
