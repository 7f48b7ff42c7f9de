mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_returns_ok() {
    // Arrange
    let (app, _) = common::build_test_app();

    // Act
    let (status, json) = common::get_json(app, "/health").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["channels"], 0);
}

#[tokio::test]
async fn test_health_counts_channels_that_were_touched() {
    // Arrange
    let (app, _) = common::build_test_app();
    common::get_json(app.clone(), &common::round_uri("general", "status")).await;
    common::get_json(app.clone(), &common::round_uri("random", "status")).await;

    // Act
    let (status, json) = common::get_json(app, "/health").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["channels"], 2);
}
