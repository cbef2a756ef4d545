//! Data management module
//!
//! Candle windows and the signal journal.

pub mod candle;
pub mod journal;

pub use candle::*;
pub use journal::*;
