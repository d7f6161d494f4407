//! One-shot evaluation of the watchlist, printed to stdout.

use dotenvy::dotenv;
use metal_sniper::config::AppConfig;
use metal_sniper::logging;
use metal_sniper::models::instrument::default_watchlist;
use metal_sniper::models::signal::{InstrumentOutcome, InstrumentReport};
use metal_sniper::services::chart_api::ChartApiProvider;
use metal_sniper::signals::engine::SignalEngine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = AppConfig::from_env()?;
    let provider = ChartApiProvider::new(config.fetch.clone())?;
    let engine = SignalEngine::new(config.engine);

    let run = engine.run(&provider, &default_watchlist()).await;
    println!("Evaluated at {}", run.evaluated_at.format("%Y-%m-%d %H:%M UTC"));
    println!();

    for outcome in &run.outcomes {
        match outcome {
            InstrumentOutcome::Ready(report) => print_report(report),
            InstrumentOutcome::Unavailable { symbol, name, error } => {
                println!("{} ({})", name, symbol);
                println!("  Data unavailable: {}", error);
            }
        }
        println!();
    }

    Ok(())
}

fn print_report(report: &InstrumentReport) {
    println!("{} ({})", report.name, report.symbol);
    println!("  Signal: {} - {}", report.tier, report.action);
    println!("  Price: {:.2}", report.price);
    println!("  RSI: {:.1}", report.rsi);
    println!(
        "  Rolling high: {:.2} ({:.1}% dip)",
        report.rolling_high, report.dip_percent
    );
    if let Some(average) = report.rolling_average {
        println!("  Moving average: {:.2}", average);
    }
    println!("  {}", report.rationale);
}
