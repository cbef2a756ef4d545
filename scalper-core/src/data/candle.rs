//! OHLCV candle data structures

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// OHLCV candle data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume
    pub volume: f64,
    /// Candle open time
    pub timestamp: DateTime<Utc>,
    /// Exchange symbol (e.g., "BTCUSDT")
    pub symbol: String,
    /// Timeframe (e.g., "5m", "15m")
    pub timeframe: String,
}

impl Candle {
    /// Create a new candle
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
        symbol: String,
        timeframe: String,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
            symbol,
            timeframe,
        }
    }

    /// Traded value of the candle at its close (close * volume)
    pub fn quote_value(&self) -> f64 {
        self.close * self.volume
    }

    /// Get total range (high - low)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

// ta indicators that work on bars (e.g. TrueRange) read candles directly.
impl ta::Open for Candle {
    fn open(&self) -> f64 {
        self.open
    }
}

impl ta::High for Candle {
    fn high(&self) -> f64 {
        self.high
    }
}

impl ta::Low for Candle {
    fn low(&self) -> f64 {
        self.low
    }
}

impl ta::Close for Candle {
    fn close(&self) -> f64 {
        self.close
    }
}

impl ta::Volume for Candle {
    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Close prices of a window, oldest first
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}
