//! Error types surfaced by the dashboard controller.

use crate::transport::TransportError;
use thiserror::Error;

/// Prompt shown when a test send is attempted without a bot or a message.
pub const VALIDATION_PROMPT: &str = "Please select a bot and enter a message";

/// Failures the controller handles while refreshing or sending.
///
/// None of them is fatal: each one is rendered into the page and the next
/// poll proceeds normally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// Request rejected, server unreachable, or non-2xx status
    #[error("{0}")]
    NetworkOrStatus(String),

    /// Missing bot selection or empty message
    #[error("{}", VALIDATION_PROMPT)]
    Validation,

    /// 2xx response whose body does not match the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A page fragment or request body could not be produced
    #[error("render error: {0}")]
    Render(String),
}

impl DashboardError {
    /// Short, stable name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::NetworkOrStatus(_) => "network_or_status",
            DashboardError::Validation => "validation",
            DashboardError::InvalidResponse(_) => "invalid_response",
            DashboardError::Render(_) => "render",
        }
    }
}

impl From<TransportError> for DashboardError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Decode(message) => DashboardError::InvalidResponse(message),
            other => DashboardError::NetworkOrStatus(other.to_string()),
        }
    }
}

impl From<minijinja::Error> for DashboardError {
    fn from(e: minijinja::Error) -> Self {
        DashboardError::Render(e.to_string())
    }
}
