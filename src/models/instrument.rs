//! Instruments on the watchlist and the class that selects their ruleset.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentClass {
    Commodity,
    EquityFund,
}

impl InstrumentClass {
    /// Lookback requested from the chart API. Equity/fund needs room for SMA(50).
    pub fn history_range(&self) -> &'static str {
        match self {
            InstrumentClass::Commodity => "30d",
            InstrumentClass::EquityFund => "60d",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub name: String,
    pub class: InstrumentClass,
    /// Upstream identifiers in priority order.
    pub candidates: Vec<String>,
}

impl Instrument {
    pub fn new(symbol: &str, name: &str, class: InstrumentClass, candidates: &[&str]) -> Self {
        let candidates = if candidates.is_empty() {
            vec![symbol.to_string()]
        } else {
            candidates.iter().map(|c| c.to_string()).collect()
        };

        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            class,
            candidates,
        }
    }
}

/// The shipped watchlist: gold, silver and the Nifty 50 index.
pub fn default_watchlist() -> Vec<Instrument> {
    vec![
        Instrument::new(
            "XAU",
            "Gold",
            InstrumentClass::Commodity,
            &["XAUUSD=X", "GC=F", "GOLD"],
        ),
        Instrument::new(
            "XAG",
            "Silver",
            InstrumentClass::Commodity,
            &["XAGUSD=X", "SI=F", "SILVER"],
        ),
        Instrument::new(
            "NIFTY",
            "Nifty 50 Index",
            InstrumentClass::EquityFund,
            &["^NSEI", "NIFTY_50.NS"],
        ),
    ]
}
