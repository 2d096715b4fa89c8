//! Fixed-cadence trigger for aggregation runs.
//!
//! The timer is re-armed only after a run has finished. Ticks that would have
//! fired while a run was in flight are dropped, never queued, so at most one
//! run is active at a time. Stopping the scheduler never interrupts a run; it
//! only prevents the next one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::aggregator::Aggregator;
use crate::stats::RunStats;

pub struct Scheduler {
    aggregator: Arc<Aggregator>,
    interval: Duration,
}

/// Handle to a running schedule loop.
pub struct SchedulerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Scheduler {
    pub fn new(aggregator: Arc<Aggregator>, interval: Duration) -> Self {
        Self {
            aggregator,
            interval,
        }
    }

    /// Run once now, then start the background loop. Resolves when the first
    /// run has settled, so callers can gate readiness on it.
    pub async fn start(self) -> (RunStats, SchedulerHandle) {
        let anchor = Instant::now();
        info!(interval_secs = self.interval.as_secs(), "Running initial aggregation");
        let initial = self.aggregator.run().await;

        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(self.run_loop(anchor, stop_rx));

        (initial, SchedulerHandle { stop_tx, task })
    }

    async fn run_loop(self, anchor: Instant, mut stop_rx: watch::Receiver<bool>) {
        let mut next = next_tick_after(anchor, Instant::now(), self.interval);
        loop {
            debug!(in_secs = next.saturating_duration_since(Instant::now()).as_secs(), "Next run scheduled");
            tokio::select! {
                _ = tokio::time::sleep_until(next) => {}
                // Err means every handle was dropped; stop either way.
                _ = stop_rx.changed() => {
                    info!("Scheduler stopped");
                    return;
                }
            }

            let stats = self.aggregator.run().await;
            debug!(added = stats.examples_added, "Scheduled run finished");

            next = next_tick_after(next, Instant::now(), self.interval);
        }
    }
}

impl SchedulerHandle {
    /// Prevent future runs. A run already in flight still completes.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// Stop and wait for the loop to exit, including any in-flight run.
    pub async fn shutdown(self) {
        self.stop();
        if let Err(e) = self.task.await {
            warn!(error = %e, "Scheduler task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// First tick on the `last + k * interval` grid that is strictly after `now`.
fn next_tick_after(last: Instant, now: Instant, interval: Duration) -> Instant {
    let mut next = last + interval;
    while next <= now {
        next += interval;
    }
    next
}
