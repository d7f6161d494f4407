//! Rolling high: drawdown anchor for the dip calculation

use crate::indicators::series::last_n;

/// Maximum of the trailing `window` highs, `None` when there are no highs.
pub fn calculate_rolling_high(highs: &[f64], window: usize) -> Option<f64> {
    last_n(highs, window).iter().copied().reduce(f64::max)
}

/// Calculate rolling high with default window (20)
pub fn calculate_rolling_high_default(highs: &[f64]) -> Option<f64> {
    calculate_rolling_high(highs, 20)
}
