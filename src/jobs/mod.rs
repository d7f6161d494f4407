//! Evaluation jobs shared by the HTTP trigger and the scheduler.

pub mod context;
pub mod handlers;

pub use context::JobContext;
pub use handlers::*;
