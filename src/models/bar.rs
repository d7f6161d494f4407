use serde::{Deserialize, Serialize};

/// One trading day. Either field may be absent on holidays or provider gaps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bar {
    pub high: Option<f64>,
    pub close: Option<f64>,
}

impl Bar {
    pub fn new(high: Option<f64>, close: Option<f64>) -> Self {
        Self { high, close }
    }
}

/// Raw price history for one instrument as handed over by a data provider.
///
/// Both sequences are chronological, oldest first, and may contain gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSeries {
    pub current_price: f64,
    pub highs: Vec<Option<f64>>,
    pub closes: Vec<Option<f64>>,
}

impl RawSeries {
    pub fn new(current_price: f64, highs: Vec<Option<f64>>, closes: Vec<Option<f64>>) -> Self {
        Self {
            current_price,
            highs,
            closes,
        }
    }

    /// Build a series from bars, splitting them into the high and close columns.
    pub fn from_bars(current_price: f64, bars: &[Bar]) -> Self {
        Self {
            current_price,
            highs: bars.iter().map(|b| b.high).collect(),
            closes: bars.iter().map(|b| b.close).collect(),
        }
    }
}
