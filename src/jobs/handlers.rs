//! Job handlers for the evaluation workflow

use std::time::Instant;
use tracing::{debug, info};

use crate::jobs::context::JobContext;
use crate::models::instrument::Instrument;
use crate::models::signal::{EngineRun, InstrumentOutcome};
use crate::notify::{dispatch, DispatchSummary};

/// Evaluate the whole watchlist and record the outcome counters.
pub async fn evaluate_watchlist(ctx: &JobContext) -> EngineRun {
    let start = Instant::now();
    let run = ctx
        .engine
        .run(ctx.data_provider.as_ref(), &ctx.watchlist)
        .await;

    for outcome in &run.outcomes {
        record_outcome(ctx, outcome);
    }

    info!(
        instruments = run.outcomes.len(),
        ready = run.reports().count(),
        duration_ms = start.elapsed().as_millis() as u64,
        "evaluated watchlist"
    );
    run
}

/// Evaluate a single instrument and record its outcome.
pub async fn evaluate_one(ctx: &JobContext, instrument: &Instrument) -> InstrumentOutcome {
    let outcome = ctx
        .engine
        .evaluate_instrument(ctx.data_provider.as_ref(), instrument)
        .await;
    record_outcome(ctx, &outcome);
    outcome
}

/// Scheduled job: evaluate and hand every outcome to the notifier.
pub async fn handle_scheduled_evaluation(ctx: &JobContext) -> (EngineRun, DispatchSummary) {
    let run = evaluate_watchlist(ctx).await;
    let summary = dispatch(ctx.notifier.as_ref(), &run).await;

    info!(
        sent = summary.sent,
        failed = summary.failed,
        "dispatched alerts"
    );
    (run, summary)
}

fn record_outcome(ctx: &JobContext, outcome: &InstrumentOutcome) {
    let Some(metrics) = ctx.metrics.as_ref() else {
        return;
    };

    match outcome {
        InstrumentOutcome::Ready(report) => {
            debug!(symbol = %report.symbol, tier = %report.tier, "recording signal");
            metrics.record_signal(report.tier);
        }
        InstrumentOutcome::Unavailable { symbol, .. } => metrics.record_unavailable(symbol),
    }
}
