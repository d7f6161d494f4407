//! Gap-tolerant view over a raw price series.
//!
//! Absent and non-finite entries are dropped; relative order is kept. Nothing
//! here fails: thin or empty input simply yields short or empty windows.

use crate::models::bar::RawSeries;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedSeries {
    pub highs: Vec<f64>,
    pub closes: Vec<f64>,
}

impl NormalizedSeries {
    pub fn from_raw(raw: &RawSeries) -> Self {
        Self {
            highs: valid_values(&raw.highs),
            closes: valid_values(&raw.closes),
        }
    }

    pub fn latest_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }
}

/// Keep only present, finite values.
pub fn valid_values(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().filter_map(|v| v.filter(|x| x.is_finite())).collect()
}

/// Trailing `n` values, or all of them when the slice is shorter.
pub fn last_n(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}
