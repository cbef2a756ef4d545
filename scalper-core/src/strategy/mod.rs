//! Strategy module
//!
//! Trend classification, the signal evaluator and the per-candle alert gate.

pub mod base;
pub mod dedup;
pub mod evaluator;
pub mod signal;
pub mod trend;

pub use base::*;
pub use dedup::*;
pub use evaluator::*;
pub use signal::*;
pub use trend::*;
