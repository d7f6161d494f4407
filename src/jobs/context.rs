//! Job context for dependency injection

use std::sync::Arc;

use crate::metrics::Metrics;
use crate::models::instrument::Instrument;
use crate::notify::Notifier;
use crate::services::market_data::MarketDataProvider;
use crate::signals::engine::SignalEngine;

/// Everything an evaluation run needs, shared read-only between the API server
/// and the scheduler.
pub struct JobContext {
    pub engine: SignalEngine,
    pub data_provider: Arc<dyn MarketDataProvider>,
    pub watchlist: Vec<Instrument>,
    pub notifier: Arc<dyn Notifier>,
    pub metrics: Option<Arc<Metrics>>,
}

impl JobContext {
    pub fn new(
        engine: SignalEngine,
        data_provider: Arc<dyn MarketDataProvider>,
        watchlist: Vec<Instrument>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            engine,
            data_provider,
            watchlist,
            notifier,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn find_instrument(&self, symbol: &str) -> Option<&Instrument> {
        self.watchlist
            .iter()
            .find(|i| i.symbol.eq_ignore_ascii_case(symbol))
    }
}
