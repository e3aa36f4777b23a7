//! Fixed-delay scan loop.
//!
//! Cycles run back to back on a single task with a full interval of sleep
//! after each one, so a slow cycle pushes the next one back instead of
//! overlapping or being skipped.

use tokio::time::{sleep, Duration};

use crate::engine::{CycleReport, Reconciler};

pub struct Scheduler {
    reconciler: Reconciler,
    interval: Duration,
}

impl Scheduler {
    pub fn new(reconciler: Reconciler, interval: Duration) -> Self {
        Self {
            reconciler,
            interval,
        }
    }

    /// Run cycles forever. The first cycle starts immediately.
    pub async fn run(mut self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Scheduler started"
        );

        loop {
            if let CycleReport::Aborted = self.reconciler.run_cycle().await {
                tracing::warn!("Cycle aborted, retrying after interval");
            }
            sleep(self.interval).await;
        }
    }
}
