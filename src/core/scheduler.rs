//! Cron-based scheduler for periodic watchlist evaluation

use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::jobs::{self, JobContext};

/// Convert a fixed interval into a six-field cron expression
/// (second minute hour day month weekday).
pub fn interval_to_cron(interval_seconds: u64) -> Option<String> {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    let expr = match interval_seconds {
        0 => return None,
        s if s >= DAY && s % DAY == 0 => format!("0 0 0 */{} * *", s / DAY),
        s if s >= HOUR && s % HOUR == 0 => format!("0 0 */{} * * *", s / HOUR),
        s if s >= MINUTE => format!("0 */{} * * * *", s / MINUTE),
        s => format!("*/{} * * * * *", s),
    };
    Some(expr)
}

/// Scheduler that periodically evaluates the watchlist and dispatches alerts
pub struct JobScheduler {
    context: Arc<JobContext>,
    schedule: Schedule,
    expression: String,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl JobScheduler {
    /// Create a scheduler from a cron expression.
    pub fn new(
        context: Arc<JobContext>,
        expression: &str,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let schedule = Schedule::from_str(expression).map_err(|e| {
            format!("Invalid cron expression '{}': {}", expression, e)
        })?;

        info!(
            cron = %expression,
            instruments = context.watchlist.len(),
            "JobScheduler: created"
        );

        Ok(Self {
            context,
            schedule,
            expression: expression.to_string(),
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Create a scheduler that fires every `interval_seconds` (0 = disabled)
    pub fn every(
        context: Arc<JobContext>,
        interval_seconds: u64,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let expression = interval_to_cron(interval_seconds)
            .ok_or("Scheduler disabled: interval_seconds is 0")?;
        Self::new(context, &expression)
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Start the scheduler
    pub async fn start(&self) {
        let context = self.context.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("JobScheduler: started, waiting for cron schedule...");

            loop {
                let Some(next_tick) = schedule.upcoming(chrono::Utc).next() else {
                    warn!("JobScheduler: schedule has no upcoming ticks, stopping");
                    break;
                };

                let now = chrono::Utc::now();
                if next_tick > now {
                    let duration = (next_tick - now).to_std().unwrap_or_default();
                    tokio::time::sleep(duration).await;
                }

                info!(tick = %next_tick, "JobScheduler: cron tick, evaluating watchlist");
                jobs::handle_scheduled_evaluation(&context).await;
            }
        });

        *self.handle.write().await = Some(handle);
        info!("JobScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("JobScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}
