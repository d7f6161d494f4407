//! SMA (Simple Moving Average) indicator

use crate::indicators::series::last_n;

/// Mean of the trailing `period` closes.
///
/// With fewer than `period` closes the most recent close is returned instead,
/// so a short history still produces a usable benchmark. `None` only when there
/// are no closes at all.
pub fn calculate_sma(closes: &[f64], period: usize) -> Option<f64> {
    let latest = closes.last().copied()?;
    if period == 0 || closes.len() < period {
        return Some(latest);
    }

    let window = last_n(closes, period);
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Calculate SMA with default period (50)
pub fn calculate_sma_default(closes: &[f64]) -> Option<f64> {
    calculate_sma(closes, 50)
}
