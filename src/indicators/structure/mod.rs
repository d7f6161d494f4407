//! Market structure: rolling extrema

pub mod rolling_high;

pub use rolling_high::*;
