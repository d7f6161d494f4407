use serde::{Deserialize, Serialize};

/// Indicators derived from one instrument's series. Recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub rsi: f64,
    pub rolling_high: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_average: Option<f64>,
}

impl IndicatorSet {
    pub fn new(rsi: f64, rolling_high: f64) -> Self {
        Self {
            rsi,
            rolling_high,
            rolling_average: None,
        }
    }

    pub fn with_rolling_average(mut self, rolling_average: f64) -> Self {
        self.rolling_average = Some(rolling_average);
        self
    }
}
