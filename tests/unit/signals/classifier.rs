//! Unit tests for the tier classifier

use metal_sniper::config::{CommodityRuleset, EngineConfig, EquityRuleset};
use metal_sniper::models::instrument::InstrumentClass;
use metal_sniper::models::signal::SignalTier;
use metal_sniper::signals::classifier::{classify, dip_percent, SignalClassifier};

fn commodity(price: f64, rsi: f64, high: f64) -> metal_sniper::models::signal::Signal {
    classify(price, rsi, high, InstrumentClass::Commodity, &EngineConfig::default())
}

fn equity(price: f64, rsi: f64, high: f64) -> metal_sniper::models::signal::Signal {
    classify(price, rsi, high, InstrumentClass::EquityFund, &EngineConfig::default())
}

#[test]
fn test_dip_percent_basics() {
    assert_eq!(dip_percent(100.0, 100.0), 0.0);
    assert_eq!(dip_percent(90.0, 100.0), 10.0);
    assert!(dip_percent(99.0, 100.0) > 0.0);
    assert!(dip_percent(110.0, 100.0) < 0.0);
}

#[test]
fn test_dip_percent_clamps_degenerate_benchmark() {
    assert_eq!(dip_percent(50.0, 0.0), 0.0);
    assert_eq!(dip_percent(50.0, -10.0), 0.0);
    assert_eq!(dip_percent(f64::NAN, 100.0), 0.0);
    assert_eq!(dip_percent(50.0, f64::INFINITY), 0.0);
    assert_eq!(dip_percent(f64::NEG_INFINITY, 100.0), 0.0);
}

#[test]
fn test_commodity_green_boundaries_inclusive() {
    assert_eq!(commodity(94.0, 40.0, 100.0).tier, SignalTier::Green);
    assert_eq!(commodity(94.1, 40.0, 100.0).tier, SignalTier::Red);
    assert_eq!(commodity(94.0, 40.1, 100.0).tier, SignalTier::Yellow);
}

#[test]
fn test_commodity_yellow_band_is_exclusive() {
    assert_eq!(commodity(98.0, 40.5, 100.0).tier, SignalTier::Yellow);
    assert_eq!(commodity(98.0, 64.9, 100.0).tier, SignalTier::Yellow);
    assert_eq!(commodity(98.0, 65.0, 100.0).tier, SignalTier::Red);
    assert_eq!(commodity(98.5, 50.0, 100.0).tier, SignalTier::Red);
}

#[test]
fn test_commodity_rsi_40_small_dip_is_red() {
    let signal = commodity(95.0, 40.0, 100.0);
    assert_eq!(signal.tier, SignalTier::Red);
    assert!(signal.rationale.contains("Noise dip of 5.0%"));
    assert_eq!(signal.action, "PAUSE BUYING");
}

#[test]
fn test_commodity_red_rationale_overheated() {
    let signal = commodity(90.0, 72.3, 100.0);
    assert_eq!(signal.tier, SignalTier::Red);
    assert!(signal.rationale.contains("overheated"));
    assert!(signal.rationale.contains("72.3"));
}

#[test]
fn test_equity_yellow_ignores_dip() {
    assert_eq!(equity(100.0, 45.0, 100.0).tier, SignalTier::Yellow);
    assert_eq!(equity(80.0, 59.9, 100.0).tier, SignalTier::Yellow);
    assert_eq!(equity(80.0, 50.0, 100.0).action, "SIT TIGHT / SIP");
}

#[test]
fn test_equity_red_rationales() {
    let overextended = equity(99.0, 60.0, 100.0);
    assert_eq!(overextended.tier, SignalTier::Red);
    assert!(overextended.rationale.contains("overextended"));

    let shallow = equity(97.0, 30.0, 100.0);
    assert_eq!(shallow.tier, SignalTier::Red);
    assert!(shallow.rationale.contains("insufficient"));
    assert!(shallow.rationale.contains("3.0%"));
    assert_eq!(shallow.action, "AVOID FRESH BUYS");
}

#[test]
fn test_non_positive_benchmark_never_green() {
    let signal = commodity(50.0, 10.0, 0.0);
    assert_eq!(signal.dip_percent, 0.0);
    assert_eq!(signal.tier, SignalTier::Red);

    let signal = equity(50.0, 10.0, -1.0);
    assert_eq!(signal.dip_percent, 0.0);
    assert_eq!(signal.tier, SignalTier::Red);
}

#[test]
fn test_non_finite_rsi_is_red() {
    for class in [InstrumentClass::Commodity, InstrumentClass::EquityFund] {
        let signal = classify(80.0, f64::NAN, 100.0, class, &EngineConfig::default());
        assert_eq!(signal.tier, SignalTier::Red);
        assert!(signal.rationale.contains("Momentum unavailable"));
        assert_eq!(signal.dip_percent, 20.0);
    }
}

#[test]
fn test_classifier_is_total_and_never_green_without_dip() {
    let config = EngineConfig::default();
    for class in [InstrumentClass::Commodity, InstrumentClass::EquityFund] {
        for rsi_step in 0..=200 {
            let rsi = rsi_step as f64 * 0.5;
            for price_step in 0..=40 {
                let price = 80.0 + price_step as f64;
                let signal = classify(price, rsi, 100.0, class, &config);
                assert!(signal.dip_percent.is_finite());
                assert!(!signal.action.is_empty());
                assert!(!signal.rationale.is_empty());
                if signal.dip_percent <= 0.0 {
                    assert_ne!(signal.tier, SignalTier::Green);
                }
            }
        }
    }
}

#[test]
fn test_classifier_is_deterministic() {
    let classifier = SignalClassifier::default();
    let first = classifier.classify(97.3, 47.2, 101.4, InstrumentClass::Commodity);
    for _ in 0..10 {
        assert_eq!(
            classifier.classify(97.3, 47.2, 101.4, InstrumentClass::Commodity),
            first
        );
    }
}

#[test]
fn test_alternate_ruleset_changes_outcome() {
    let strict = EngineConfig {
        commodity: CommodityRuleset {
            green_dip_min: 12.0,
            ..CommodityRuleset::default()
        },
        equity: EquityRuleset {
            green_dip_above: 1.0,
            ..EquityRuleset::default()
        },
        ..EngineConfig::default()
    };
    let classifier = SignalClassifier::new(strict);

    assert_eq!(
        classifier.classify(90.0, 35.0, 100.0, InstrumentClass::Commodity).tier,
        SignalTier::Red
    );
    assert_eq!(
        classifier.classify(97.0, 40.0, 100.0, InstrumentClass::EquityFund).tier,
        SignalTier::Green
    );
}
