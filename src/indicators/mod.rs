//! Indicator calculation over normalized daily series.

pub mod series;

pub mod momentum;
pub mod structure;
pub mod trend;

pub use series::*;

use crate::config::IndicatorConfig;
use crate::models::indicators::IndicatorSet;
use crate::models::instrument::InstrumentClass;

/// Compute the full indicator set for one instrument.
///
/// With no usable highs the rolling high is `current_price` itself, so the dip
/// is zero and no entry signal is drawn from closes. Equity/fund instruments
/// also carry SMA(n).
pub fn calculate_indicator_set(
    series: &NormalizedSeries,
    current_price: f64,
    class: InstrumentClass,
    config: &IndicatorConfig,
) -> IndicatorSet {
    let rsi = momentum::calculate_rsi_with(&series.closes, config);

    let rolling_high = structure::calculate_rolling_high(&series.highs, config.rolling_high_window)
        .unwrap_or(current_price);

    let indicators = IndicatorSet::new(rsi, rolling_high);

    match class {
        InstrumentClass::Commodity => indicators,
        InstrumentClass::EquityFund => {
            match trend::calculate_sma(&series.closes, config.sma_window) {
                Some(sma) => indicators.with_rolling_average(sma),
                None => indicators,
            }
        }
    }
}
