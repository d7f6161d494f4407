//! Unit tests for RSI indicator

use metal_sniper::config::IndicatorConfig;
use metal_sniper::indicators::momentum::{calculate_rsi, calculate_rsi_default, calculate_rsi_with};
use metal_sniper::indicators::series::valid_values;

/// 15 closes: start at 100 then alternate +2 / -1 seven times.
fn alternating_closes() -> Vec<f64> {
    let mut closes = vec![100.0];
    for _ in 0..7 {
        let last = *closes.last().unwrap();
        closes.push(last + 2.0);
        closes.push(last + 1.0);
    }
    closes
}

#[test]
fn test_rsi_insufficient_data_is_neutral() {
    let closes: Vec<f64> = (0..14).map(|i| 100.0 - i as f64 * 3.0).collect();
    assert_eq!(calculate_rsi_default(&closes), 50.0);
    assert_eq!(calculate_rsi_default(&[]), 50.0);
    assert_eq!(calculate_rsi_default(&[42.0]), 50.0);
}

#[test]
fn test_rsi_gaps_count_against_window() {
    // 20 raw entries but only 13 valid closes
    let raw: Vec<Option<f64>> = (0..20)
        .map(|i| if i % 3 == 0 { None } else { Some(100.0 + i as f64) })
        .collect();
    let closes = valid_values(&raw);
    assert_eq!(closes.len(), 13);
    assert_eq!(calculate_rsi_default(&closes), 50.0);
}

#[test]
fn test_rsi_known_value() {
    let closes = alternating_closes();
    assert_eq!(closes.len(), 15);
    // gains 14, losses 7 -> RS 2 -> RSI 66.67
    let rsi = calculate_rsi_default(&closes);
    assert!((rsi - (100.0 - 100.0 / 3.0)).abs() < 1e-9);
}

#[test]
fn test_rsi_uses_only_trailing_window() {
    let mut closes = vec![500.0, 20.0, 400.0];
    closes.extend(alternating_closes());
    let rsi = calculate_rsi_default(&closes);
    assert!((rsi - calculate_rsi_default(&alternating_closes())).abs() < 1e-12);
}

#[test]
fn test_rsi_non_decreasing_is_100() {
    let rising: Vec<f64> = (0..30).map(|i| 100.0 + i as f64 * 0.25).collect();
    assert_eq!(calculate_rsi_default(&rising), 100.0);

    let flat = vec![42.0; 15];
    assert_eq!(calculate_rsi_default(&flat), 100.0);
}

#[test]
fn test_rsi_strictly_falling_is_0() {
    let falling: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
    assert_eq!(calculate_rsi_default(&falling), 0.0);
}

#[test]
fn test_rsi_stays_in_bounds() {
    for len in 15..60 {
        let closes: Vec<f64> = (0..len)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + (i as f64 * 1.3).cos() * 2.0)
            .collect();
        let rsi = calculate_rsi_default(&closes);
        assert!((0.0..=100.0).contains(&rsi), "rsi {} out of range", rsi);
    }
}

#[test]
fn test_rsi_with_custom_config() {
    let config = IndicatorConfig {
        rsi_period: 2,
        rsi_neutral: 42.0,
        ..IndicatorConfig::default()
    };
    assert_eq!(config.rsi_window(), 3);
    assert_eq!(calculate_rsi_with(&[1.0, 2.0], &config), 42.0);
    // last three closes: 10 -> 12 -> 11: gain 2, loss 1
    let rsi = calculate_rsi_with(&[50.0, 10.0, 12.0, 11.0], &config);
    assert!((rsi - (100.0 - 100.0 / 3.0)).abs() < 1e-9);
}

#[test]
fn test_rsi_zero_period_is_neutral() {
    assert_eq!(calculate_rsi(&[1.0, 2.0, 3.0], 0, 50.0), 50.0);
}

#[test]
fn test_rsi_overflowing_sums_fall_back_to_neutral() {
    // finite closes whose differences sum past f64::MAX
    let closes: Vec<f64> = (0..15)
        .map(|i| if i % 2 == 0 { 1e308 } else { 1e-308 })
        .collect();
    let rsi = calculate_rsi_default(&closes);
    assert!(rsi.is_finite());
    assert_eq!(rsi, 50.0);
}
