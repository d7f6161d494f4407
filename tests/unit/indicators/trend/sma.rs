//! Unit tests for SMA indicator

use metal_sniper::indicators::trend::{calculate_sma, calculate_sma_default};

#[test]
fn test_sma_sufficient_data() {
    let closes = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(calculate_sma(&closes, 5), Some(3.0));
    assert_eq!(calculate_sma(&closes, 2), Some(4.5));
}

#[test]
fn test_sma_short_history_falls_back_to_latest_close() {
    let closes: Vec<f64> = (0..49).map(|i| i as f64).collect();
    assert_eq!(calculate_sma_default(&closes), Some(48.0));
}

#[test]
fn test_sma_default_window_is_50() {
    let mut closes = vec![1_000.0; 10];
    closes.extend(std::iter::repeat(10.0).take(50));
    assert_eq!(calculate_sma_default(&closes), Some(10.0));
}

#[test]
fn test_sma_empty_input() {
    assert_eq!(calculate_sma(&[], 50), None);
}
