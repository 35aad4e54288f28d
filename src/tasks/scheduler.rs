//! Task Scheduler
//!
//! Owns the periodic background tasks and their shutdown signal.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::Config;
use crate::service::LinkService;
use crate::tasks::{spawn_cache_guard, spawn_expiration_sweeper};

/// Runs the expiration sweeper and the cache-size guard until shut down.
pub struct Scheduler {
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl Scheduler {
    /// Starts both tasks with the periods from `config`.
    pub fn start(service: LinkService, config: &Config) -> Self {
        Self::with_periods(service, config.sweep_period(), config.guard_period())
    }

    /// Starts both tasks with explicit periods. Zero periods are raised to 1ms.
    pub fn with_periods(service: LinkService, sweep: Duration, guard: Duration) -> Self {
        let floor = Duration::from_millis(1);
        let (shutdown, signal) = watch::channel(false);

        let handles = vec![
            spawn_expiration_sweeper(service.clone(), sweep.max(floor), signal.clone()),
            spawn_cache_guard(service, guard.max(floor), signal),
        ];

        Self { shutdown, handles }
    }

    /// Returns true while every task is still running.
    pub fn is_running(&self) -> bool {
        self.handles.iter().all(|handle| !handle.is_finished())
    }

    /// Signals both tasks to stop and waits for them.
    ///
    /// A pass already in progress completes before its task exits.
    pub async fn shutdown(self) {
        info!("Stopping background tasks");
        // Receivers also treat a dropped sender as shutdown.
        let _ = self.shutdown.send(true);

        for handle in self.handles {
            if let Err(e) = handle.await {
                warn!("Background task ended abnormally: {}", e);
            }
        }
        info!("Background tasks stopped");
    }
}
