//! Rule-based tier classification.
//!
//! Every input maps to exactly one tier. Rules are evaluated top to bottom
//! and the first match wins. A Green tier always requires a positive dip.

use crate::config::{CommodityRuleset, EngineConfig, EquityRuleset};
use crate::models::instrument::InstrumentClass;
use crate::models::signal::{Signal, SignalTier};

/// Percentage decline of `price` below `benchmark`.
///
/// Zero when the benchmark is not positive or any operand is non-finite.
pub fn dip_percent(price: f64, benchmark: f64) -> f64 {
    if !price.is_finite() || !benchmark.is_finite() || benchmark <= 0.0 {
        return 0.0;
    }

    let dip = (benchmark - price) * 100.0 / benchmark;
    if dip.is_finite() {
        dip
    } else {
        0.0
    }
}

/// Classifier bound to one set of rulesets.
#[derive(Debug, Clone, Copy)]
pub struct SignalClassifier {
    config: EngineConfig,
}

impl SignalClassifier {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn classify(
        &self,
        price: f64,
        rsi: f64,
        benchmark: f64,
        class: InstrumentClass,
    ) -> Signal {
        classify(price, rsi, benchmark, class, &self.config)
    }
}

impl Default for SignalClassifier {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Classify one instrument with the ruleset for its class.
pub fn classify(
    price: f64,
    rsi: f64,
    benchmark: f64,
    class: InstrumentClass,
    config: &EngineConfig,
) -> Signal {
    let dip = dip_percent(price, benchmark);

    if !rsi.is_finite() {
        return Signal {
            tier: SignalTier::Red,
            action: red_action(class).to_string(),
            rationale: format!(
                "Momentum unavailable. Dip of {:.1}% cannot be confirmed; holding off.",
                dip
            ),
            dip_percent: dip,
        };
    }

    match class {
        InstrumentClass::Commodity => classify_commodity(dip, rsi, &config.commodity),
        InstrumentClass::EquityFund => classify_equity(dip, rsi, &config.equity),
    }
}

fn red_action(class: InstrumentClass) -> &'static str {
    match class {
        InstrumentClass::Commodity => "PAUSE BUYING",
        InstrumentClass::EquityFund => "AVOID FRESH BUYS",
    }
}

pub fn classify_commodity(dip: f64, rsi: f64, rules: &CommodityRuleset) -> Signal {
    if dip > 0.0 && rsi <= rules.green_rsi_max && dip >= rules.green_dip_min {
        return Signal {
            tier: SignalTier::Green,
            action: "AGGRESSIVE BUY".to_string(),
            rationale: format!(
                "Significant dip of {:.1}% from the rolling high with RSI oversold at {:.1}. \
                 Deploy the base allocation plus any saved tranches.",
                dip, rsi
            ),
            dip_percent: dip,
        };
    }

    if rsi > rules.yellow_rsi_floor && rsi < rules.overheated_rsi && dip >= rules.yellow_dip_min {
        return Signal {
            tier: SignalTier::Yellow,
            action: "STANDARD TRANCHE".to_string(),
            rationale: format!(
                "Healthy pullback of {:.1}% with RSI at {:.1}. Deploy the base allocation only.",
                dip, rsi
            ),
            dip_percent: dip,
        };
    }

    let rationale = if rsi >= rules.overheated_rsi {
        format!(
            "Market overheated: RSI {:.1} is at or above {:.0} with a dip of only {:.1}%.",
            rsi, rules.overheated_rsi, dip
        )
    } else {
        format!(
            "Noise dip of {:.1}% with RSI at {:.1}. Park funds in a high-yield account.",
            dip, rsi
        )
    };

    Signal {
        tier: SignalTier::Red,
        action: red_action(InstrumentClass::Commodity).to_string(),
        rationale,
        dip_percent: dip,
    }
}

pub fn classify_equity(dip: f64, rsi: f64, rules: &EquityRuleset) -> Signal {
    if dip > 0.0 && rsi < rules.green_rsi_below && dip > rules.green_dip_above {
        return Signal {
            tier: SignalTier::Green,
            action: "ACCUMULATE".to_string(),
            rationale: format!(
                "Corrected {:.1}% from the rolling high with RSI at {:.1}. \
                 Mean-reversion entry for a lump sum.",
                dip, rsi
            ),
            dip_percent: dip,
        };
    }

    if rsi >= rules.green_rsi_below && rsi < rules.overextended_rsi {
        return Signal {
            tier: SignalTier::Yellow,
            action: "SIT TIGHT / SIP".to_string(),
            rationale: format!(
                "Neutral momentum zone (RSI {:.1}, dip {:.1}%). \
                 Maintain recurring contributions, no lump sum.",
                rsi, dip
            ),
            dip_percent: dip,
        };
    }

    let rationale = if rsi >= rules.overextended_rsi {
        format!(
            "Momentum overextended: RSI {:.1} is at or above {:.0} with a dip of {:.1}%.",
            rsi, rules.overextended_rsi, dip
        )
    } else {
        format!(
            "Minor dip of {:.1}% with RSI at {:.1} is insufficient for entry.",
            dip, rsi
        )
    };

    Signal {
        tier: SignalTier::Red,
        action: red_action(InstrumentClass::EquityFund).to_string(),
        rationale,
        dip_percent: dip,
    }
}
