//! Watch command implementation

use crate::cli::output::format_page_pretty;
use crate::cli::WatchArgs;
use crate::controller::Poller;
use crate::page::Page;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;

/// Format a page snapshot for output
pub fn format_snapshot(page: &Page, json: bool) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string(page)
    } else {
        Ok(format_page_pretty(page))
    }
}

/// Handle `bot-admin watch` command
///
/// Polls until Ctrl+C, printing the page whenever it changes.
pub async fn run_watch(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(&args.connection)?;
    if let Some(interval) = args.interval {
        config.dashboard.poll_interval_seconds = interval;
    }
    config.validate()?;

    crate::logging::init_tracing(&config.logging)?;

    tracing::info!(
        url = %config.server.base_url,
        interval_seconds = config.dashboard.poll_interval_seconds,
        "Watching bot server"
    );

    let (tx, mut rx) = broadcast::channel(64);
    let controller = Arc::new(super::build_controller(&config)?.with_broadcast(tx));

    let cancel_token = CancellationToken::new();
    let poller = Poller::new(
        Arc::clone(&controller),
        Duration::from_secs(config.dashboard.poll_interval_seconds),
    )
    .start(cancel_token.clone());

    let mut last_printed: Option<Page> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
            update = rx.recv() => match update {
                Ok(page) => {
                    if last_printed.as_ref() == Some(&page) {
                        continue;
                    }
                    println!("{}", format_snapshot(&page, args.json)?);
                    last_printed = Some(page);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Page updates skipped");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    cancel_token.cancel();
    poller.await?;

    Ok(())
}
