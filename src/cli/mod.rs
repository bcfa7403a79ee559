//! CLI module for bot-admin
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `watch` - Poll the bot server and print the admin page on every change
//! - `status` - Refresh once and print the bot catalog
//! - `send` - Send a test message to one bot and print its reply
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Follow a local bot server
//! bot-admin watch --url http://localhost:8000
//!
//! # Ask the enterprise bot something through a specific model
//! bot-admin send -b enterprise -m "hello" --model Claude-3-Opus
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod send;
pub mod status;
pub mod watch;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::clock::SystemClock;
use crate::config::AdminConfig;
use crate::controller::DashboardController;
use crate::transport::HttpTransport;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

/// bot-admin - Bot server admin panel
#[derive(Parser, Debug)]
#[command(
    name = "bot-admin",
    version,
    about = "Admin panel for multi-bot chat servers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the bot server and print the page on every change
    Watch(WatchArgs),
    /// Refresh once and print the bot catalog
    Status(StatusArgs),
    /// Send a test message to a bot
    Send(SendArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that talks to the bot server.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "bot-admin.toml")]
    pub config: PathBuf,

    /// Override bot server URL
    #[arg(short, long, env = "BOT_ADMIN_URL")]
    pub url: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "BOT_ADMIN_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Override seconds between health polls
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Print page snapshots as JSON lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Bot to address
    #[arg(short, long)]
    pub bot: String,

    /// Message text
    #[arg(short, long)]
    pub message: String,

    /// Model for model-selection bots (defaults to the first configured model)
    #[arg(long)]
    pub model: Option<String>,

    /// Output the raw reply as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "bot-admin.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load configuration with CLI overrides
///
/// A missing config file falls back to defaults.
pub fn load_config(args: &ConnectionArgs) -> Result<AdminConfig, Box<dyn std::error::Error>> {
    let mut config = if args.config.exists() {
        AdminConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        AdminConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(ref url) = args.url {
        config.server.base_url = url.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Build a controller talking to the configured bot server
pub fn build_controller(
    config: &AdminConfig,
) -> Result<DashboardController, Box<dyn std::error::Error>> {
    let transport = HttpTransport::new(
        &config.server.base_url,
        config.server.request_timeout_seconds,
    )?;
    let controller = DashboardController::new(
        Arc::new(transport),
        Arc::new(SystemClock),
        &config.dashboard,
    )?;
    Ok(controller)
}
