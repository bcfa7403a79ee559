//! Wire contract with the bot server.
//!
//! The server exposes two endpoints consumed by the admin panel:
//!
//! - `GET /health` returns a [`ServerHealth`] document
//! - `POST /bot/{id}` accepts a [`TestPayload`] and answers with a [`TestReply`]

pub mod types;

pub use types::{Message, ReplyChunk, ServerHealth, TestPayload, TestReply};

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/health";

/// Path of the endpoint serving a single bot.
pub fn bot_path(bot: &str) -> String {
    format!("/bot/{}", bot)
}
