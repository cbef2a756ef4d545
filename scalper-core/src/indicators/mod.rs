//! Technical indicators module
//!
//! Provides technical analysis indicators using the `ta` crate. Streaming
//! indicators implement [`Indicator`]; the `calculate_*` helpers run one over
//! a whole series. Undefined values (warm-up, division by zero) are `None`.

pub mod atr;
pub mod bb;
pub mod ema;
pub mod rsi;
pub mod sma;
pub mod stddev;
pub mod volatility;
pub mod volume;

pub use atr::*;
pub use bb::*;
pub use ema::*;
pub use rsi::*;
pub use sma::*;
pub use stddev::*;
pub use volatility::*;
pub use volume::*;

use thiserror::Error;

/// Indicator construction / input errors
#[derive(Debug, Error, PartialEq)]
pub enum IndicatorError {
    #[error("{indicator} period must be greater than zero")]
    InvalidPeriod { indicator: &'static str },
    #[error("{0} needs at least one value")]
    EmptySeries(&'static str),
}

/// Indicator trait for all indicators
pub trait Indicator {
    /// Get the name of the indicator
    fn name(&self) -> &str;

    /// Update indicator with new value
    fn update(&mut self, value: f64);

    /// Get current indicator value
    fn value(&self) -> Option<f64>;

    /// Check if indicator is ready (has enough data)
    fn is_ready(&self) -> bool;
}

pub(crate) fn check_period(indicator: &'static str, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod { indicator });
    }
    Ok(())
}

/// Last element of an indicator series, flattened
pub fn last_value(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}
