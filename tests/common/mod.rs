//! Shared helpers for bot-admin integration tests.

#![allow(dead_code)]

use bot_admin::clock::ManualClock;
use bot_admin::config::DashboardConfig;
use bot_admin::controller::DashboardController;
use bot_admin::transport::HttpTransport;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fixed clock reading used for every test send.
pub const TEST_TIMESTAMP_MICROS: i64 = 1_700_000_000_000_000;

/// Health document with the two-bot catalog used across tests.
pub fn two_bot_health() -> Value {
    json!({
        "status": "healthy",
        "total_requests": 5,
        "available_bots": ["support", "enterprise"],
        "bot_descriptions": {"support": "Help desk"}
    })
}

/// Serve `body` on `GET /health`.
pub async fn mount_health(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Controller wired to `server` through a real HTTP transport.
pub fn controller_for(server: &MockServer) -> DashboardController {
    controller_with_config(server, &DashboardConfig::default())
}

pub fn controller_with_config(server: &MockServer, config: &DashboardConfig) -> DashboardController {
    let transport = HttpTransport::new(&server.uri(), None).unwrap();
    DashboardController::new(
        Arc::new(transport),
        Arc::new(ManualClock::new(TEST_TIMESTAMP_MICROS)),
        config,
    )
    .unwrap()
}

/// Number of requests `server` received for `method_name` + `url_path`.
pub async fn request_count(server: &MockServer, method_name: &str, url_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == method_name && r.url.path() == url_path)
        .count()
}

/// JSON bodies of every `POST` the server received.
pub async fn posted_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == "POST")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}
