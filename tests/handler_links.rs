mod common;

use chrono::Duration;

#[tokio::test]
async fn test_list_empty() {
    let (server, _clock, _rx) = common::make_server();

    let response = server.get("/urls").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>(), serde_json::json!([]));
}

#[tokio::test]
async fn test_list_returns_live_links_in_creation_order() {
    let (server, clock, _rx) = common::make_server();

    common::create_link(&server, "https://example.com/1", None, Some("first")).await;
    clock.advance(Duration::seconds(1));
    common::create_link(&server, "https://example.com/2", None, Some("second")).await;

    let json = server.get("/urls").await.json::<serde_json::Value>();
    let items = json.as_array().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["code"], "first");
    assert_eq!(items[1]["code"], "second");
    assert_eq!(items[1]["originalUrl"], "https://example.com/2");
    assert_eq!(items[1]["shortLink"], "http://sho.rt/second");
}

#[tokio::test]
async fn test_list_hides_expired_links() {
    let (server, clock, _rx) = common::make_server();

    common::create_link(&server, "https://example.com/short", Some(1), Some("gone")).await;
    common::create_link(&server, "https://example.com/long", Some(60), Some("kept")).await;

    clock.advance(Duration::minutes(2));

    let json = server.get("/urls").await.json::<serde_json::Value>();
    let items = json.as_array().unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["code"], "kept");
}

#[tokio::test]
async fn test_list_includes_click_data() {
    let (server, _clock, _rx) = common::make_server();

    common::create_link(&server, "https://example.com", None, Some("clicked")).await;
    server.get("/clicked").await;
    server.get("/clicked").await;

    let json = server.get("/urls").await.json::<serde_json::Value>();

    assert_eq!(json[0]["clicks"], 2);
    assert_eq!(json[0]["clickHistory"].as_array().unwrap().len(), 2);
}
