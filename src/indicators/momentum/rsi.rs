//! RSI (Relative Strength Index) indicator

use crate::config::IndicatorConfig;
use crate::indicators::series::last_n;

/// Calculate RSI over the trailing `period + 1` closes.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Thin history (fewer than `period + 1` closes) yields `neutral` instead of a
/// value computed from too few differences. No losses in the window yields 100.
/// Sums that overflow (finite but extreme closes) also fall back to `neutral`.
pub fn calculate_rsi(closes: &[f64], period: usize, neutral: f64) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return neutral;
    }

    let window = last_n(closes, period + 1);
    let (gain_sum, loss_sum) = window
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold((0.0, 0.0), |(gains, losses), change| {
            if change >= 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses - change)
            }
        });

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if !avg_gain.is_finite() || !avg_loss.is_finite() {
        return neutral;
    }

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));
    if rsi.is_finite() {
        rsi.clamp(0.0, 100.0)
    } else {
        neutral
    }
}

/// Calculate RSI with the configured period and neutral fallback
pub fn calculate_rsi_with(closes: &[f64], config: &IndicatorConfig) -> f64 {
    calculate_rsi(closes, config.rsi_period, config.rsi_neutral)
}

/// Calculate RSI with default period (14) and neutral fallback (50)
pub fn calculate_rsi_default(closes: &[f64]) -> f64 {
    calculate_rsi_with(closes, &IndicatorConfig::default())
}
