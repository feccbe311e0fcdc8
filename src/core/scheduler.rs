//! Hourly scheduler
//!
//! Runs one pipeline cycle at startup, then one at every wall-clock hour
//! boundary. The wait is recomputed from the clock after each cycle, so
//! cycle duration never accumulates as drift. A failed cycle is logged and
//! the loop carries on to the next boundary.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, TimeZone, Timelike};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::adapters::FundingRateSource;
use crate::config::PipelineConfig;
use crate::core::delivery::{deliver_to_all, DeliverySummary, Notifier, SubscriberStore};
use crate::core::detector::detect;
use crate::core::fetcher::fetch_snapshot;
use crate::core::report::format_report;
use crate::error::{AppError, Result};

const HOUR: Duration = Duration::from_secs(3600);

/// Wall-clock source
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Reads the system's local time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Time left until the next `HH:00:00`.
///
/// Exactly on a boundary this is a full hour.
pub fn until_next_hour<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let into_hour = Duration::from_secs(u64::from(now.minute() * 60 + now.second()))
        + Duration::from_nanos(u64::from(now.nanosecond() % 1_000_000_000));
    HOUR.saturating_sub(into_hour)
}

/// Next boundary to wake at, strictly after `previous`.
///
/// A clock stepped back across the boundary just served would otherwise
/// schedule that hour a second time.
pub fn next_boundary<Tz: TimeZone>(now: &DateTime<Tz>, previous: Option<&DateTime<Tz>>) -> DateTime<Tz> {
    let after = |t: &DateTime<Tz>| {
        let wait = chrono::Duration::from_std(until_next_hour(t)).unwrap_or_else(|_| chrono::Duration::hours(1));
        t.clone() + wait
    };

    let target = after(now);
    match previous {
        Some(previous) if target <= *previous => after(previous),
        _ => target,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// How a successful cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No symbol listed on both exchanges
    NoOpportunities,
    /// Report built but nobody is subscribed
    NoSubscribers,
    Delivered(DeliverySummary),
}

pub struct Scheduler {
    source_a: Arc<dyn FundingRateSource>,
    source_b: Arc<dyn FundingRateSource>,
    store: Arc<dyn SubscriberStore>,
    notifier: Arc<dyn Notifier>,
    config: PipelineConfig,
    clock: Arc<dyn Clock>,
    state: SchedulerState,
}

impl Scheduler {
    pub fn new(
        source_a: Arc<dyn FundingRateSource>,
        source_b: Arc<dyn FundingRateSource>,
        store: Arc<dyn SubscriberStore>,
        notifier: Arc<dyn Notifier>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source_a,
            source_b,
            store,
            notifier,
            config,
            clock: Arc::new(SystemClock),
            state: SchedulerState::Idle,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    fn transition(&mut self, next: SchedulerState) {
        if self.state != next {
            info!(from = ?self.state, to = ?next, "Scheduler state changed");
            self.state = next;
        }
    }

    /// One fetch → detect → format → deliver pass.
    ///
    /// Errors are exchange outages or a failing subscriber store.
    pub async fn run_cycle(&self) -> Result<CycleOutcome> {
        let (snapshot_a, snapshot_b) = tokio::join!(
            fetch_snapshot(self.source_a.as_ref(), &self.config),
            fetch_snapshot(self.source_b.as_ref(), &self.config),
        );
        let snapshot_a = snapshot_a?;
        let snapshot_b = snapshot_b?;

        let report = detect(&snapshot_a, &snapshot_b, self.config.report_size).with_labels(
            self.source_a.display_name(),
            self.source_b.display_name(),
        );

        let Some(payload) = format_report(&report, &self.clock.now()) else {
            info!(
                symbols_a = snapshot_a.len(),
                symbols_b = snapshot_b.len(),
                "No common symbols, nothing to report"
            );
            return Ok(CycleOutcome::NoOpportunities);
        };

        let subscribers = self.store.list_subscribers().await?;
        if subscribers.is_empty() {
            info!(opportunities = report.len(), "No subscribers, report not sent");
            return Ok(CycleOutcome::NoSubscribers);
        }

        let summary = deliver_to_all(self.notifier.as_ref(), &subscribers, &payload).await;
        Ok(CycleOutcome::Delivered(summary))
    }

    /// Run one cycle with state tracking; failures are logged, not returned.
    pub async fn tick(&mut self) -> Option<CycleOutcome> {
        self.transition(SchedulerState::Running);
        let started = Instant::now();
        let result = self.run_cycle().await;
        self.transition(SchedulerState::Idle);

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(outcome) => {
                info!(?outcome, elapsed_ms, "Cycle complete");
                Some(outcome)
            }
            Err(e) => {
                error!(error = %e, elapsed_ms, "Cycle failed, skipping until next hour");
                None
            }
        }
    }

    /// Cycle now, then on every hour boundary. Never returns.
    pub async fn run(mut self) {
        info!(
            exchange_a = self.source_a.exchange_name(),
            exchange_b = self.source_b.exchange_name(),
            "Scheduler started"
        );

        let mut last_target: Option<DateTime<Local>> = None;
        loop {
            self.tick().await;
            let now = self.clock.now();
            let target = next_boundary(&now, last_target.as_ref());
            let wait = (target - now).to_std().unwrap_or(Duration::ZERO);
            info!(next_cycle_in_secs = wait.as_secs(), "Waiting for next hour");
            last_target = Some(target);
            tokio::time::sleep(wait).await;
        }
    }
}

/// Run until `shutdown` resolves, then abort the scheduler task.
///
/// The scheduler never returns, so the task finishing first (a panic or
/// cancellation) is reported as an error.
pub async fn supervise<F>(mut task: JoinHandle<()>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    tokio::select! {
        joined = &mut task => {
            let reason = match joined {
                Ok(()) => "scheduler task returned".to_string(),
                Err(e) if e.is_panic() => format!("scheduler task panicked: {}", e),
                Err(e) => format!("scheduler task stopped: {}", e),
            };
            error!(reason = %reason, "Scheduler died, no more reports will be sent");
            Err(AppError::Scheduler(reason))
        }
        () = shutdown => {
            task.abort();
            info!("[SHUTDOWN] Scheduler stopped");
            Ok(())
        }
    }
}
