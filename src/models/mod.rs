//! Shared data models spanning the engine layers.

pub mod bar;
pub mod indicators;
pub mod instrument;
pub mod signal;

pub use bar::{Bar, RawSeries};
pub use indicators::IndicatorSet;
pub use instrument::{default_watchlist, Instrument, InstrumentClass};
pub use signal::{EngineRun, InstrumentOutcome, InstrumentReport, Signal, SignalTier};
