//! Higher timeframe trend classification

use crate::data::{closes, Candle};
use crate::indicators::{calculate_ema, IndicatorError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trend label of the higher timeframe window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    Sideways,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Sideways => write!(f, "sideways"),
        }
    }
}

/// Dual-EMA trend classifier
#[derive(Debug, Clone, Copy)]
pub struct TrendClassifier {
    pub fast: usize,
    pub slow: usize,
}

impl TrendClassifier {
    pub fn new(fast: usize, slow: usize) -> Self {
        Self { fast, slow }
    }

    /// Compare the last fast and slow EMA of the closes.
    ///
    /// A slow period longer than the window leaves that EMA under-warmed; the
    /// comparison still runs on whatever it has.
    pub fn classify(&self, candles: &[Candle]) -> Result<Trend, IndicatorError> {
        let closes = closes(candles);
        let fast = calculate_ema(&closes, self.fast)?;
        let slow = calculate_ema(&closes, self.slow)?;

        match (fast.last(), slow.last()) {
            (Some(fast), Some(slow)) if fast > slow => Ok(Trend::Up),
            (Some(fast), Some(slow)) if fast < slow => Ok(Trend::Down),
            (Some(_), Some(_)) => Ok(Trend::Sideways),
            _ => Err(IndicatorError::EmptySeries("TrendClassifier")),
        }
    }
}

impl Default for TrendClassifier {
    fn default() -> Self {
        Self::new(30, 90)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn window(closes: impl Iterator<Item = f64>) -> Vec<Candle> {
        let start = Utc::now();
        closes
            .enumerate()
            .map(|(i, c)| {
                Candle::new(c, c, c, c, 1.0, start + Duration::minutes(15 * i as i64), "BTCUSDT".to_string(), "15m".to_string())
            })
            .collect()
    }

    #[test]
    fn test_rising_is_up() {
        let candles = window((0..50).map(|i| 100.0 + i as f64));
        assert_eq!(TrendClassifier::default().classify(&candles).unwrap(), Trend::Up);
    }

    #[test]
    fn test_falling_is_down() {
        let candles = window((0..50).map(|i| 200.0 - i as f64));
        assert_eq!(TrendClassifier::default().classify(&candles).unwrap(), Trend::Down);
    }

    #[test]
    fn test_flat_is_sideways() {
        // A power of two keeps every EMA step exact
        let candles = window(std::iter::repeat(32.0).take(50));
        assert_eq!(TrendClassifier::default().classify(&candles).unwrap(), Trend::Sideways);
    }

    #[test]
    fn test_empty_window_is_error() {
        assert!(TrendClassifier::default().classify(&[]).is_err());
    }
}
