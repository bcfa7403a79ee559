//! bot-admin - admin panel for multi-bot chat servers
//!
//! This library polls a bot server's health endpoint, renders the bot catalog
//! into the regions of an admin page, and sends manual test messages to a
//! selected bot so an operator can inspect its reply.

pub mod api;
pub mod cli;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod page;
pub mod render;
pub mod transport;
