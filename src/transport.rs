//! HTTP transport seam between the controller and the bot server.
//!
//! The controller only talks to a [`Transport`]; production code uses
//! [`HttpTransport`] (reqwest), tests substitute scripted implementations.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while talking to the bot server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Server answered outside the 2xx range
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Connection refused, reset, DNS failure and the like
    #[error("connection failed: {0}")]
    Connection(String),

    /// Configured request timeout elapsed
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Body is not valid JSON
    #[error("invalid JSON body: {0}")]
    Decode(String),
}

/// JSON-over-HTTP operations the dashboard needs.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// `GET {path}` and decode the body as JSON.
    async fn get_json(&self, path: &str) -> Result<Value, TransportError>;

    /// `POST {path}` with a JSON body and decode the JSON answer.
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError>;
}

/// [`Transport`] backed by a pooled reqwest client.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
    timeout_seconds: Option<u64>,
}

impl HttpTransport {
    /// Create a transport rooted at `base_url`.
    ///
    /// Without `timeout_seconds` requests may wait indefinitely.
    pub fn new(base_url: &str, timeout_seconds: Option<u64>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self::with_client(base_url, client, timeout_seconds))
    }

    /// Create a transport with a caller-supplied client (for testing).
    pub fn with_client(base_url: &str, client: reqwest::Client, timeout_seconds: Option<u64>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_seconds,
        }
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn classify_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(self.timeout_seconds.unwrap_or_default())
        } else {
            TransportError::Connection(e.to_string())
        }
    }

    async fn read_json(&self, response: reqwest::Response) -> Result<Value, TransportError> {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.classify_error(e))?;
        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;
        self.read_json(response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;
        self.read_json(response).await
    }
}
