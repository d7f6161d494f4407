//! External data collaborators.

pub mod chart_api;
pub mod market_data;

pub use chart_api::ChartApiProvider;
pub use market_data::{MarketDataError, MarketDataProvider, StaticMarketDataProvider};
