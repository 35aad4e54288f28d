//! Expiration Sweeper Task
//!
//! Background task that periodically deletes expired links from the durable
//! store and evicts their cache entries.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::service::LinkService;

/// Spawns a task that runs an expiration sweep every `interval`.
///
/// The task exits when `shutdown` flips to true or its sender is dropped. The
/// signal is only observed between sweeps, so a sweep in progress always
/// runs to completion.
///
/// # Example
/// ```ignore
/// let (tx, rx) = tokio::sync::watch::channel(false);
/// let handle = spawn_expiration_sweeper(service.clone(), Duration::from_secs(20), rx);
/// // Later, during shutdown:
/// tx.send(true).ok();
/// handle.await.ok();
/// ```
pub fn spawn_expiration_sweeper(
    service: LinkService,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting expiration sweeper with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; wait a full period instead.
        ticker.tick().await;

        while !*shutdown.borrow() {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown.changed() => break,
            }

            match service.run_expiration_sweep().await {
                // The service logs the totals of each pass.
                Ok(deleted) => debug!("Expiration sweep task: {} deleted", deleted),
                Err(e) if e.is_fatal() => error!("Expiration sweep failed: {}", e),
                Err(e) => warn!("Expiration sweep aborted: {}", e),
            }
        }

        info!("Expiration sweeper stopped");
    })
}
