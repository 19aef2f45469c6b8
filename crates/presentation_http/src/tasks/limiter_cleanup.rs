//! Rate limiter cleanup task
//!
//! Periodically drops closed windows so the limiter does not grow with every
//! client address it has ever seen.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::middleware::FixedWindowLimiter;

/// Spawn a background task that purges expired limiter windows.
///
/// Returns a `JoinHandle` that can be used to abort the task when shutting down.
pub fn spawn_limiter_cleanup_task(
    limiter: Arc<FixedWindowLimiter>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    info!(
        interval_secs = interval.as_secs(),
        "Starting rate limiter cleanup task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval.max(Duration::from_secs(1)));
        // Don't run immediately on startup
        ticker.tick().await;

        loop {
            ticker.tick().await;
            limiter.purge_expired();
            debug!(tracked = limiter.tracked_keys(), "Purged expired rate limit windows");
        }
    })
}
