#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::mpsc;
use expiring_shortener::api::routes::public_routes;
use expiring_shortener::application::services::{LinkService, ValidityPolicy};
use expiring_shortener::domain::{ManualClock, Registry};
use expiring_shortener::infrastructure::telemetry::{LogEntry, TelemetryHandle};
use expiring_shortener::state::AppState;

pub const BASE_URL: &str = "http://sho.rt";

/// State backed by a fresh registry on a manual clock.
///
/// Keep the receiver alive: dropping it closes the telemetry queue and
/// degrades `/health`.
pub fn create_test_state() -> (AppState, Arc<ManualClock>, mpsc::Receiver<LogEntry>) {
    let clock = Arc::new(ManualClock::default());
    let registry = Arc::new(Registry::new(clock.clone()));
    let (telemetry, rx) = TelemetryHandle::channel(1000);

    let link_service = Arc::new(LinkService::new(
        registry,
        BASE_URL,
        ValidityPolicy::default(),
        telemetry.clone(),
    ));

    (AppState::new(link_service, telemetry), clock, rx)
}

pub fn app(state: AppState) -> Router {
    public_routes().with_state(state)
}

pub fn make_server() -> (TestServer, Arc<ManualClock>, mpsc::Receiver<LogEntry>) {
    let (state, clock, rx) = create_test_state();
    let server = TestServer::new(app(state)).unwrap();
    (server, clock, rx)
}

/// Creates a link through the API and returns the response body.
pub async fn create_link(server: &TestServer, url: &str, validity: Option<i64>, code: Option<&str>) -> Value {
    let mut body = json!({ "url": url });
    if let Some(validity) = validity {
        body["validity"] = json!(validity);
    }
    if let Some(code) = code {
        body["shortcode"] = json!(code);
    }

    let response = server.post("/shorturls").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
