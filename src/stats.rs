// src/stats.rs

//! Aggregate statistics panel.

use tokio::time::Instant;
use tracing::debug;

use crate::api::DashboardBackend;
use crate::engine::RefreshTimer;
use crate::status::Statistics;

/// Polls `/tasks/statistics` on its own timer, independent of the table.
///
/// Each successful fetch replaces all values; a failed one leaves the last
/// known values on screen.
#[derive(Debug)]
pub struct StatisticsPoller {
    current: Option<Statistics>,
    updated_at: Option<Instant>,
    timer: RefreshTimer,
}

impl StatisticsPoller {
    /// The timer should fire its first tick immediately, so the panel is
    /// filled as soon as the poller starts.
    pub fn new(timer: RefreshTimer) -> Self {
        Self {
            current: None,
            updated_at: None,
            timer: timer.with_immediate_first_tick(),
        }
    }

    pub fn start(&mut self) {
        self.timer.start();
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn accepts_tick(&self, generation: u64) -> bool {
        self.timer.accepts(generation)
    }

    /// Fetch once. Returns whether the displayed values changed source.
    pub async fn poll<B>(&mut self, backend: &B) -> bool
    where
        B: DashboardBackend + ?Sized,
    {
        match backend.statistics().await {
            Ok(stats) => {
                debug!(?stats, "statistics updated");
                self.current = Some(stats);
                self.updated_at = Some(Instant::now());
                true
            }
            Err(error) => {
                debug!(%error, "statistics fetch failed; keeping last values");
                false
            }
        }
    }

    pub fn current(&self) -> Option<&Statistics> {
        self.current.as_ref()
    }

    pub fn updated_at(&self) -> Option<Instant> {
        self.updated_at
    }
}
