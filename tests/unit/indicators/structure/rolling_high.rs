//! Unit tests for rolling high

use metal_sniper::indicators::structure::{calculate_rolling_high, calculate_rolling_high_default};

#[test]
fn test_rolling_high_ignores_values_outside_window() {
    let mut highs = vec![500.0];
    highs.extend((0..20).map(|i| 100.0 + i as f64));
    assert_eq!(calculate_rolling_high_default(&highs), Some(119.0));
}

#[test]
fn test_rolling_high_short_history_uses_all_values() {
    assert_eq!(calculate_rolling_high(&[3.0, 9.0, 4.0], 20), Some(9.0));
}

#[test]
fn test_rolling_high_empty_input() {
    assert_eq!(calculate_rolling_high_default(&[]), None);
}
