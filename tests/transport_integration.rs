//! HTTP transport tests against a mock bot server

use bot_admin::transport::{HttpTransport, Transport, TransportError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_json_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&server.uri(), None).unwrap();
    let body = transport.get_json("/health").await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_base_url_with_trailing_slash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&format!("{}/", server.uri()), None).unwrap();
    transport.get_json("/health").await.unwrap();
}

#[tokio::test]
async fn test_post_json_sends_body_and_content_type() {
    let server = MockServer::start().await;
    let payload = json!({"query": [{"role": "user", "content": "hi"}]});
    Mock::given(method("POST"))
        .and(path("/bot/echo"))
        .and(header("content-type", "application/json"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"text": "hi"}])))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&server.uri(), None).unwrap();
    let reply = transport.post_json("/bot/echo", &payload).await.unwrap();
    assert_eq!(reply[0]["text"], "hi");
}

#[tokio::test]
async fn test_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&server.uri(), None).unwrap();
    let err = transport
        .post_json("/bot/missing", &json!({}))
        .await
        .unwrap_err();
    assert_eq!(err, TransportError::Status(404));
    assert_eq!(err.to_string(), "HTTP error! status: 404");
}

#[tokio::test]
async fn test_invalid_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&server.uri(), None).unwrap();
    let err = transport.get_json("/health").await.unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    // Port 1 is reserved and nothing listens on it
    let transport = HttpTransport::new("http://127.0.0.1:1", None).unwrap();
    let err = transport.get_json("/health").await.unwrap_err();
    assert!(matches!(err, TransportError::Connection(_)));
}

#[tokio::test]
async fn test_configured_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&server.uri(), Some(1)).unwrap();
    let err = transport.get_json("/health").await.unwrap_err();
    assert_eq!(err, TransportError::Timeout(1));
}
