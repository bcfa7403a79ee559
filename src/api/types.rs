//! Request and response bodies exchanged with the bot server.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role attached to every test message.
pub const USER_ROLE: &str = "user";

/// Content type attached to every test message.
pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";

/// Body of `GET /health`.
///
/// Every poll replaces the previous value wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerHealth {
    pub status: String,
    pub total_requests: u64,
    /// Bot identifiers in server order
    pub available_bots: Vec<String>,
    /// Optional per-bot descriptions; servers that omit it get an empty map
    #[serde(default)]
    pub bot_descriptions: HashMap<String, String>,
}

impl ServerHealth {
    /// Description for `bot`, if the server provided a non-empty one.
    pub fn description(&self, bot: &str) -> Option<&str> {
        self.bot_descriptions
            .get(bot)
            .map(String::as_str)
            .filter(|d| !d.is_empty())
    }
}

/// A single chat message in a test query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
    pub content_type: String,
    /// Microseconds since the Unix epoch
    pub timestamp: i64,
}

/// Body of `POST /bot/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPayload {
    pub query: Vec<Message>,
}

impl TestPayload {
    /// Build a single-message query.
    ///
    /// With `model` set, the content becomes a `{"model": ...}` JSON header
    /// line followed by the message text.
    pub fn new(message: &str, model: Option<&str>, timestamp: i64) -> Self {
        let content = match model {
            Some(model) => format!("{}\n{}", serde_json::json!({ "model": model }), message),
            None => message.to_string(),
        };

        Self {
            query: vec![Message {
                role: USER_ROLE.to_string(),
                content,
                content_type: MARKDOWN_CONTENT_TYPE.to_string(),
                timestamp,
            }],
        }
    }
}

/// One partial response from a bot. Only `text` is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyChunk {
    #[serde(default)]
    pub text: Option<String>,
}

/// Body returned by `POST /bot/{id}`: the bot's partial responses in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestReply(pub Vec<ReplyChunk>);

impl TestReply {
    /// Text of the first chunk. Missing, null and empty text all yield `None`.
    pub fn first_text(&self) -> Option<&str> {
        self.0
            .first()
            .and_then(|chunk| chunk.text.as_deref())
            .filter(|text| !text.is_empty())
    }
}
