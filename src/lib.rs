//! Indicator and signal engine for a small watchlist of metals, indices and funds.
//!
//! Raw daily series are normalized, reduced to RSI and rolling benchmarks, and
//! classified into GREEN / YELLOW / RED capital-deployment tiers.

pub mod config;
pub mod core;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod notify;
pub mod services;
pub mod signals;
