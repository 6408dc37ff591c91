// src/engine/timer.rs

//! Periodic tick source for the table and statistics pollers.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use super::{DashboardEvent, TimerTarget};

/// Shared view of whether a timer is currently installed.
#[derive(Debug, Clone, Default)]
pub struct TimerActivity(Arc<AtomicBool>);

impl TimerActivity {
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn set(&self, active: bool) {
        self.0.store(active, Ordering::SeqCst);
    }
}

/// Sends `DashboardEvent::Tick` every `period` while started.
///
/// - `start` always aborts the previous tick task before spawning a new one,
///   so there is never more than one live timer per instance.
/// - Each start bumps the generation carried by the ticks; consumers use
///   [`RefreshTimer::accepts`] to drop ticks that were already queued by a
///   replaced timer.
pub struct RefreshTimer {
    target: TimerTarget,
    period: Duration,
    immediate_first_tick: bool,
    tx: mpsc::Sender<DashboardEvent>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
    activity: TimerActivity,
}

impl fmt::Debug for RefreshTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshTimer")
            .field("target", &self.target)
            .field("period", &self.period)
            .field("generation", &self.generation)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl RefreshTimer {
    pub fn new(target: TimerTarget, period: Duration, tx: mpsc::Sender<DashboardEvent>) -> Self {
        Self {
            target,
            period,
            immediate_first_tick: false,
            tx,
            handle: None,
            generation: 0,
            activity: TimerActivity::default(),
        }
    }

    /// Fire the first tick right away instead of after one period.
    pub fn with_immediate_first_tick(mut self) -> Self {
        self.immediate_first_tick = true;
        self
    }

    pub fn start(&mut self) {
        self.stop();
        self.generation += 1;

        let target = self.target;
        let period = self.period;
        let generation = self.generation;
        let tx = self.tx.clone();
        let first = if self.immediate_first_tick {
            Instant::now()
        } else {
            Instant::now() + period
        };

        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(DashboardEvent::Tick { target, generation }).await.is_err() {
                    debug!(?target, "event channel closed; timer exiting");
                    break;
                }
            }
        }));
        self.activity.set(true);

        debug!(?target, generation, ?period, "timer started");
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!(target = ?self.target, generation = self.generation, "timer stopped");
        }
        self.activity.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.activity.is_active()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a tick with `generation` comes from the live timer.
    pub fn accepts(&self, generation: u64) -> bool {
        self.is_active() && generation == self.generation
    }

    pub fn activity(&self) -> TimerActivity {
        self.activity.clone()
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
