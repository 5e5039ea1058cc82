//! EvictionSweeper - background removal of stale fixed-window counters.
//!
//! With `EvictionMode::Background` the request path never scans the counter
//! map; this task does it on a fixed period instead.
//!
//! ## Graceful Shutdown
//!
//! The sweeper listens on a watch channel and runs one last sweep before
//! stopping.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

use super::RateLimiterStrategy;

/// Periodically evicts stale entries from a limiter.
pub struct EvictionSweeper {
    limiter: Arc<RateLimiterStrategy>,
    interval: Duration,
}

impl EvictionSweeper {
    pub fn new(limiter: Arc<RateLimiterStrategy>, interval: Duration) -> Self {
        Self { limiter, interval }
    }

    /// Run the sweep loop until shutdown signal is received.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.interval);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        self.sweep_once();
                        tracing::debug!("eviction sweeper stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.sweep_once();
                }
            }
        }
    }

    /// Runs one sweep, returning how many entries were evicted.
    pub fn sweep_once(&self) -> usize {
        let removed = self.limiter.evict_stale();
        if removed > 0 {
            tracing::debug!(removed, "swept stale rate limit entries");
        }
        removed
    }

    /// Spawns the loop on the current runtime.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }
}
