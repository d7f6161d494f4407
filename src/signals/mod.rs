//! Signal classification and the engine facade.

pub mod classifier;
pub mod engine;

pub use classifier::*;
pub use engine::SignalEngine;
