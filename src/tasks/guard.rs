//! Cache-Size Guard Task
//!
//! Periodic guard pass over the popularity cache, backing up the pass that
//! runs after every insert.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::service::LinkService;

/// Spawns a task that runs a cache-size check every `interval`.
///
/// Shutdown works as for the expiration sweeper.
pub fn spawn_cache_guard(
    service: LinkService,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache-size guard with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        while !*shutdown.borrow() {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shutdown.changed() => break,
            }

            let evicted = service.run_cache_size_check();
            debug!(
                "Cache-size guard: {} evicted, {} cached",
                evicted,
                service.cache().size()
            );
        }

        info!("Cache-size guard stopped");
    })
}
