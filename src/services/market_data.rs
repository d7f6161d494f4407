//! Market data provider interface.
//!
//! The engine only ever sees a [`RawSeries`]; where it came from, which ticker
//! finally answered and how many retries it took stay behind this trait.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::bar::RawSeries;
use crate::models::instrument::Instrument;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarketDataError {
    #[error("request for {ticker} timed out after {timeout_ms}ms")]
    Timeout { ticker: String, timeout_ms: u64 },

    #[error("HTTP {status} for {ticker}")]
    Http { ticker: String, status: u16 },

    #[error("transport error for {ticker}: {reason}")]
    Transport { ticker: String, reason: String },

    #[error("malformed response for {ticker}: {reason}")]
    Malformed { ticker: String, reason: String },

    #[error("no usable price data for {ticker}")]
    EmptySeries { ticker: String },

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    #[error("all identifiers for {symbol} failed: {}", .attempts.join("; "))]
    AllCandidatesFailed {
        symbol: String,
        attempts: Vec<String>,
    },
}

impl MarketDataError {
    /// Whether retrying the same identifier may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Timeout { .. } | MarketDataError::Transport { .. } => true,
            MarketDataError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch the daily series for an instrument, trying its candidate identifiers
    /// in priority order.
    async fn fetch_series(&self, instrument: &Instrument) -> Result<RawSeries, MarketDataError>;
}

/// Provider backed by series loaded up front. Used for offline runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketDataProvider {
    series: HashMap<String, RawSeries>,
}

impl StaticMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, series: RawSeries) -> Self {
        self.series.insert(symbol.to_uppercase(), series);
        self
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn fetch_series(&self, instrument: &Instrument) -> Result<RawSeries, MarketDataError> {
        self.series
            .get(&instrument.symbol.to_uppercase())
            .cloned()
            .ok_or_else(|| MarketDataError::AllCandidatesFailed {
                symbol: instrument.symbol.clone(),
                attempts: instrument
                    .candidates
                    .iter()
                    .map(|c| format!("{}: not loaded", c))
                    .collect(),
            })
    }
}
