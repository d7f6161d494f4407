//! Engine facade: series in, per-instrument signal out.

use chrono::Utc;
use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::indicators::{calculate_indicator_set, NormalizedSeries};
use crate::models::bar::RawSeries;
use crate::models::instrument::Instrument;
use crate::models::signal::{EngineRun, InstrumentOutcome, InstrumentReport};
use crate::services::market_data::MarketDataProvider;
use crate::signals::classifier::SignalClassifier;

#[derive(Debug, Clone, Copy, Default)]
pub struct SignalEngine {
    classifier: SignalClassifier,
}

impl SignalEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            classifier: SignalClassifier::new(config),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        self.classifier.config()
    }

    /// Normalize, compute indicators and classify. Pure and total.
    pub fn evaluate_series(&self, instrument: &Instrument, raw: &RawSeries) -> InstrumentReport {
        let series = NormalizedSeries::from_raw(raw);

        let price = if raw.current_price.is_finite() && raw.current_price > 0.0 {
            raw.current_price
        } else {
            series.latest_close().unwrap_or(raw.current_price)
        };

        let indicators =
            calculate_indicator_set(&series, price, instrument.class, &self.config().indicators);
        let signal = self.classifier.classify(
            price,
            indicators.rsi,
            indicators.rolling_high,
            instrument.class,
        );

        debug!(
            symbol = %instrument.symbol,
            price,
            rsi = indicators.rsi,
            rolling_high = indicators.rolling_high,
            dip = signal.dip_percent,
            tier = %signal.tier,
            "classified instrument"
        );

        InstrumentReport {
            symbol: instrument.symbol.clone(),
            name: instrument.name.clone(),
            class: instrument.class,
            price,
            rsi: indicators.rsi,
            rolling_high: indicators.rolling_high,
            rolling_average: indicators.rolling_average,
            dip_percent: signal.dip_percent,
            tier: signal.tier,
            action: signal.action,
            rationale: signal.rationale,
        }
    }

    /// Fetch and evaluate one instrument. A missing series becomes an explicit
    /// `Unavailable` outcome.
    pub async fn evaluate_instrument(
        &self,
        provider: &dyn MarketDataProvider,
        instrument: &Instrument,
    ) -> InstrumentOutcome {
        match provider.fetch_series(instrument).await {
            Ok(raw) => InstrumentOutcome::Ready(self.evaluate_series(instrument, &raw)),
            Err(e) => {
                warn!(symbol = %instrument.symbol, error = %e, "series unavailable");
                InstrumentOutcome::Unavailable {
                    symbol: instrument.symbol.clone(),
                    name: instrument.name.clone(),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Evaluate every instrument concurrently. Outcomes keep the watchlist order.
    pub async fn run(
        &self,
        provider: &dyn MarketDataProvider,
        instruments: &[Instrument],
    ) -> EngineRun {
        let outcomes = join_all(
            instruments
                .iter()
                .map(|instrument| self.evaluate_instrument(provider, instrument)),
        )
        .await;

        EngineRun {
            evaluated_at: Utc::now(),
            outcomes,
        }
    }
}
