//! Unit tests for the evaluation scheduler

use crate::common::{commodity, falling_closes, series_from_closes};
use metal_sniper::core::scheduler::{interval_to_cron, JobScheduler};
use metal_sniper::jobs::JobContext;
use metal_sniper::notify::LogNotifier;
use metal_sniper::services::market_data::StaticMarketDataProvider;
use metal_sniper::signals::engine::SignalEngine;
use std::sync::Arc;

fn context() -> Arc<JobContext> {
    let provider =
        StaticMarketDataProvider::new().with_series("XAU", series_from_closes(&falling_closes(20), 1.0));
    Arc::new(JobContext::new(
        SignalEngine::default(),
        Arc::new(provider),
        vec![commodity("XAU")],
        Arc::new(LogNotifier),
    ))
}

#[test]
fn test_interval_to_cron() {
    assert_eq!(interval_to_cron(0), None);
    assert_eq!(interval_to_cron(30).as_deref(), Some("*/30 * * * * *"));
    assert_eq!(interval_to_cron(60).as_deref(), Some("0 */1 * * * *"));
    assert_eq!(interval_to_cron(900).as_deref(), Some("0 */15 * * * *"));
    assert_eq!(interval_to_cron(7_200).as_deref(), Some("0 0 */2 * * *"));
    assert_eq!(interval_to_cron(604_800).as_deref(), Some("0 0 0 */7 * *"));
}

#[test]
fn test_interval_not_whole_minutes_rounds_down() {
    assert_eq!(interval_to_cron(90).as_deref(), Some("0 */1 * * * *"));
}

#[test]
fn test_every_builds_valid_schedule() {
    let scheduler = JobScheduler::every(context(), 3_600).expect("valid schedule");
    assert_eq!(scheduler.expression(), "0 0 */1 * * *");
}

#[test]
fn test_every_zero_is_disabled() {
    assert!(JobScheduler::every(context(), 0).is_err());
}

#[test]
fn test_invalid_expression_rejected() {
    let err = JobScheduler::new(context(), "every monday").err().expect("should fail");
    assert!(err.to_string().contains("Invalid cron expression"));
}

#[tokio::test]
async fn test_start_and_stop() {
    // Fires once a year, so the loop stays parked on its first sleep.
    let scheduler = JobScheduler::new(context(), "0 0 0 1 1 *").expect("valid schedule");
    assert!(!scheduler.is_running().await);

    scheduler.start().await;
    assert!(scheduler.is_running().await);

    scheduler.stop().await;
    assert!(!scheduler.is_running().await);
}
