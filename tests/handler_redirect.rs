mod common;

use axum::http::StatusCode;
use chrono::Duration;

#[tokio::test]
async fn test_redirect_success() {
    let (server, _clock, _rx) = common::make_server();

    common::create_link(&server, "https://example.com/target", None, Some("go1")).await;

    let response = server.get("/go1").await;

    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, _clock, _rx) = common::make_server();

    let response = server.get("/nothere").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["details"]["shortcode"], "nothere");
}

#[tokio::test]
async fn test_redirect_expired_is_gone() {
    let (server, clock, _rx) = common::make_server();

    common::create_link(&server, "https://example.com", Some(1), Some("brief")).await;

    clock.advance(Duration::seconds(30));
    assert_eq!(server.get("/brief").await.status_code(), StatusCode::FOUND);

    clock.advance(Duration::seconds(31));
    let response = server.get("/brief").await;

    assert_eq!(response.status_code(), StatusCode::GONE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "expired");

    // Stays gone on repeat requests.
    assert_eq!(server.get("/brief").await.status_code(), StatusCode::GONE);
}

#[tokio::test]
async fn test_redirect_records_click_details() {
    let (server, _clock, _rx) = common::make_server();

    common::create_link(&server, "https://example.com", None, Some("track")).await;

    server
        .get("/track")
        .add_header("User-Agent", "Mozilla/5.0")
        .add_header("Referer", "https://news.example.org/")
        .await;
    server.get("/track").await;

    let json = server.get("/stats/track").await.json::<serde_json::Value>();

    assert_eq!(json["clicks"], 2);
    let history = json["clickHistory"].as_array().unwrap();
    assert_eq!(history.len(), 2);

    assert_eq!(history[0]["userAgent"], "Mozilla/5.0");
    assert_eq!(history[0]["referrer"], "https://news.example.org/");
    assert_eq!(history[1]["userAgent"], "unknown");
    assert_eq!(history[1]["referrer"], "direct");
}

#[tokio::test]
async fn test_failed_redirect_records_nothing() {
    let (server, clock, _rx) = common::make_server();

    common::create_link(&server, "https://example.com", Some(1), Some("late")).await;
    clock.advance(Duration::minutes(2));

    server.get("/late").await;

    // Same code, fresh record: no clicks carried over from the expired one.
    common::create_link(&server, "https://example.com/new", None, Some("late")).await;
    let json = server.get("/stats/late").await.json::<serde_json::Value>();
    assert_eq!(json["clicks"], 0);
    assert_eq!(json["originalUrl"], "https://example.com/new");
}
