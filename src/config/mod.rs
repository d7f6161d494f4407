//! Runtime configuration.
//!
//! Ruleset thresholds and indicator windows are immutable values passed into the
//! calculator and classifier. I/O settings (ports, upstream URL, timeouts) are
//! read from the environment once at startup.

use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MARKET_DATA_BASE_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Window lengths and fallbacks used by the indicator calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    /// Returned when fewer than `rsi_period + 1` valid closes exist.
    pub rsi_neutral: f64,
    pub rolling_high_window: usize,
    pub sma_window: usize,
}

impl IndicatorConfig {
    /// Number of closes needed to produce `rsi_period` differences.
    pub fn rsi_window(&self) -> usize {
        self.rsi_period + 1
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            rsi_neutral: 50.0,
            rolling_high_window: 20,
            sma_window: 50,
        }
    }
}

/// Thresholds for precious metals and other commodities.
///
/// Green: `rsi <= green_rsi_max && dip >= green_dip_min`
/// Yellow: `yellow_rsi_floor < rsi < overheated_rsi && dip >= yellow_dip_min`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommodityRuleset {
    pub green_rsi_max: f64,
    pub green_dip_min: f64,
    pub yellow_rsi_floor: f64,
    pub yellow_dip_min: f64,
    pub overheated_rsi: f64,
}

impl Default for CommodityRuleset {
    fn default() -> Self {
        Self {
            green_rsi_max: 40.0,
            green_dip_min: 6.0,
            yellow_rsi_floor: 40.0,
            yellow_dip_min: 2.0,
            overheated_rsi: 65.0,
        }
    }
}

/// Thresholds for equity indices and mutual funds.
///
/// Green: `rsi < green_rsi_below && dip > green_dip_above`
/// Yellow: `green_rsi_below <= rsi < overextended_rsi`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityRuleset {
    pub green_rsi_below: f64,
    pub green_dip_above: f64,
    pub overextended_rsi: f64,
}

impl Default for EquityRuleset {
    fn default() -> Self {
        Self {
            green_rsi_below: 45.0,
            green_dip_above: 4.0,
            overextended_rsi: 60.0,
        }
    }
}

/// Everything the pure engine needs. Cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineConfig {
    pub indicators: IndicatorConfig,
    pub commodity: CommodityRuleset,
    pub equity: EquityRuleset,
}

/// Settings for the market data provider.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub attempt_timeout: Duration,
    pub retries: usize,
    pub retry_min_delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MARKET_DATA_BASE_URL.to_string(),
            attempt_timeout: Duration::from_millis(8_000),
            retries: 1,
            retry_min_delay: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub fetch: FetchConfig,
    pub port: u16,
    pub eval_interval_seconds: u64,
    /// Six-field cron expression; takes precedence over `eval_interval_seconds`.
    pub eval_cron: Option<String>,
    pub cron_secret: Option<String>,
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let fetch = FetchConfig {
            base_url: env::var("MARKET_DATA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_MARKET_DATA_BASE_URL.to_string()),
            attempt_timeout: Duration::from_millis(parse_var("FETCH_TIMEOUT_MS", 8_000u64)?),
            retries: parse_var("FETCH_RETRIES", 1usize)?,
            ..FetchConfig::default()
        };

        Ok(Self {
            engine: EngineConfig::default(),
            fetch,
            port: parse_var("PORT", 8080u16)?,
            eval_interval_seconds: parse_var("EVAL_INTERVAL_SECONDS", 0u64)?,
            eval_cron: env::var("EVAL_CRON").ok().filter(|s| !s.trim().is_empty()),
            cron_secret: env::var("CRON_SECRET").ok().filter(|s| !s.is_empty()),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            fetch: FetchConfig::default(),
            port: 8080,
            eval_interval_seconds: 0,
            eval_cron: None,
            cron_secret: None,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(default),
    }
}

/// Deployment environment name, lowercased. Defaults to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .or_else(|_| env::var("ENVIRONMENT"))
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|_| "sandbox".to_string())
}
