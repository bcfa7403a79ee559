//! Timer task driving the periodic health poll.

use super::{DashboardController, Event};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

/// Background task that refreshes the page on load and then on every tick.
///
/// Each refresh runs as its own task, so a hung request never delays the
/// next tick. Overlapping refreshes are allowed; the last one to finish
/// wins.
pub struct Poller {
    controller: Arc<DashboardController>,
    interval: Duration,
}

impl Poller {
    pub fn new(controller: Arc<DashboardController>, interval: Duration) -> Self {
        Self {
            controller,
            interval,
        }
    }

    /// Start polling. Resolves when `cancel_token` is cancelled; in-flight
    /// refreshes are aborted at that point.
    pub fn start(self, cancel_token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            tracing::info!(
                interval_seconds = self.interval.as_secs(),
                "Health poller started"
            );

            let mut in_flight = JoinSet::new();
            let mut event = Event::PageLoaded;

            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        tracing::info!("Health poller shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        while in_flight.try_join_next().is_some() {}

                        let controller = Arc::clone(&self.controller);
                        let tick = std::mem::replace(&mut event, Event::TimerTick);
                        in_flight.spawn(async move { controller.handle(tick).await });

                        tracing::trace!(in_flight = in_flight.len(), "Health poll scheduled");
                    }
                }
            }

            in_flight.abort_all();
        })
    }
}
