//! Metal Sniper Worker
//!
//! Re-evaluates the watchlist on a cron schedule and dispatches alerts.

use dotenvy::dotenv;
use metal_sniper::config::AppConfig;
use metal_sniper::core::scheduler::JobScheduler;
use metal_sniper::jobs::JobContext;
use metal_sniper::logging;
use metal_sniper::metrics::Metrics;
use metal_sniper::models::instrument::default_watchlist;
use metal_sniper::notify::LogNotifier;
use metal_sniper::services::chart_api::ChartApiProvider;
use metal_sniper::signals::engine::SignalEngine;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = AppConfig::from_env()?;
    let env = metal_sniper::config::get_environment();
    info!("Starting Metal Sniper Worker");
    info!(environment = %env, "Environment");

    if config.eval_cron.is_none() && config.eval_interval_seconds == 0 {
        return Err("EVAL_CRON or EVAL_INTERVAL_SECONDS must be set for worker".into());
    }

    let metrics = Arc::new(Metrics::new()?);
    let provider = Arc::new(ChartApiProvider::new(config.fetch.clone())?);
    let watchlist = default_watchlist();
    info!(
        symbols = ?watchlist.iter().map(|i| i.symbol.as_str()).collect::<Vec<_>>(),
        "Watchlist loaded"
    );

    let context = Arc::new(
        JobContext::new(
            SignalEngine::new(config.engine),
            provider,
            watchlist,
            Arc::new(LogNotifier),
        )
        .with_metrics(metrics),
    );

    let scheduler = match config.eval_cron.as_deref() {
        Some(expression) => JobScheduler::new(context, expression),
        None => JobScheduler::every(context, config.eval_interval_seconds),
    }
    .map_err(|e| format!("Failed to create scheduler: {}", e))?;
    scheduler.start().await;

    info!(cron = %scheduler.expression(), "Worker started, waiting for shutdown signal...");
    signal::ctrl_c().await?;

    info!("Shutting down worker...");
    scheduler.stop().await;
    info!("Worker stopped");

    Ok(())
}
