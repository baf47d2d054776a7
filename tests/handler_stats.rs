mod common;

use axum::http::StatusCode;
use chrono::Duration;

#[tokio::test]
async fn test_stats_success() {
    let (server, _clock, _rx) = common::make_server();

    common::create_link(&server, "https://example.com/page", Some(10), Some("stat1")).await;
    server.get("/stat1").await;

    let response = server.get("/stats/stat1").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "stat1");
    assert_eq!(json["originalUrl"], "https://example.com/page");
    assert_eq!(json["shortLink"], "http://sho.rt/stat1");
    assert_eq!(json["clicks"], 1);
    assert!(json.get("createdAt").is_some());
    assert!(json.get("expiry").is_some());
    assert_eq!(json["clickHistory"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_stats_does_not_count_as_click() {
    let (server, _clock, _rx) = common::make_server();

    common::create_link(&server, "https://example.com", None, Some("quiet")).await;

    for _ in 0..3 {
        server.get("/stats/quiet").await.assert_status_ok();
    }

    let json = server.get("/stats/quiet").await.json::<serde_json::Value>();
    assert_eq!(json["clicks"], 0);
    assert!(json["clickHistory"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_shorturls_path_matches_stats_path() {
    let (server, _clock, _rx) = common::make_server();

    common::create_link(&server, "https://example.com", None, Some("same")).await;

    let a = server.get("/stats/same").await.json::<serde_json::Value>();
    let b = server.get("/shorturls/same").await.json::<serde_json::Value>();

    assert_eq!(a, b);
}

#[tokio::test]
async fn test_stats_not_found() {
    let (server, _clock, _rx) = common::make_server();

    server.get("/stats/missing").await.assert_status_not_found();
    server.get("/shorturls/missing").await.assert_status_not_found();
}

#[tokio::test]
async fn test_stats_expired() {
    let (server, clock, _rx) = common::make_server();

    common::create_link(&server, "https://example.com", Some(1), Some("old")).await;
    clock.advance(Duration::seconds(61));

    let response = server.get("/stats/old").await;
    assert_eq!(response.status_code(), StatusCode::GONE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "expired");
    assert!(json["error"]["details"].get("expiry").is_some());
}
