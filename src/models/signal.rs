use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::instrument::InstrumentClass;

/// Recommended capital-deployment posture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalTier {
    Green,
    Yellow,
    Red,
}

impl SignalTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalTier::Green => "GREEN",
            SignalTier::Yellow => "YELLOW",
            SignalTier::Red => "RED",
        }
    }
}

impl fmt::Display for SignalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub tier: SignalTier,
    pub action: String,
    pub rationale: String,
    pub dip_percent: f64,
}

/// Per-instrument result record handed to the API and alert collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentReport {
    pub symbol: String,
    pub name: String,
    pub class: InstrumentClass,
    pub price: f64,
    pub rsi: f64,
    pub rolling_high: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_average: Option<f64>,
    pub dip_percent: f64,
    pub tier: SignalTier,
    pub action: String,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstrumentOutcome {
    Ready(InstrumentReport),
    Unavailable {
        symbol: String,
        name: String,
        error: String,
    },
}

impl InstrumentOutcome {
    pub fn symbol(&self) -> &str {
        match self {
            InstrumentOutcome::Ready(report) => &report.symbol,
            InstrumentOutcome::Unavailable { symbol, .. } => symbol,
        }
    }

    pub fn report(&self) -> Option<&InstrumentReport> {
        match self {
            InstrumentOutcome::Ready(report) => Some(report),
            InstrumentOutcome::Unavailable { .. } => None,
        }
    }
}

/// One pass of the engine over the whole watchlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineRun {
    pub evaluated_at: DateTime<Utc>,
    pub outcomes: Vec<InstrumentOutcome>,
}

impl EngineRun {
    pub fn reports(&self) -> impl Iterator<Item = &InstrumentReport> {
        self.outcomes.iter().filter_map(InstrumentOutcome::report)
    }

    pub fn find(&self, symbol: &str) -> Option<&InstrumentOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.symbol().eq_ignore_ascii_case(symbol))
    }
}
