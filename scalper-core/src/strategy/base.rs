//! Signal and decision types shared by the evaluator, the journal and the bot

use crate::strategy::{ConfidenceLevel, Trend};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction of a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Buy/Long signal
    Buy,
    /// Sell/Short signal
    Sell,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Trading signal ready to be alerted and logged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Exchange symbol
    pub symbol: String,
    /// Signal direction
    pub direction: Direction,
    /// Entry price (last close)
    pub entry_price: f64,
    /// Stop loss price
    pub stop_loss: f64,
    /// Take profit price
    pub take_profit: f64,
    /// Additive confidence score (0 to 5)
    pub confidence: f64,
    /// Label derived from the score
    pub confidence_level: ConfidenceLevel,
    /// Higher timeframe trend
    pub trend: Trend,
    /// Return volatility of the entry window
    pub volatility: f64,
    /// Reward over risk, two decimals
    pub risk_reward: f64,
    /// Open time of the candle the signal fired on
    pub timestamp: DateTime<Utc>,
    /// Entry timeframe (e.g., "5m")
    pub timeframe: String,
    /// Trend timeframe (e.g., "15m")
    pub trend_timeframe: String,
}

/// Why an evaluation produced no signal
#[derive(Debug, Clone, PartialEq)]
pub enum HoldReason {
    /// A candle window is shorter than the indicators need
    InsufficientCandles { needed: usize, got: usize },
    /// An indicator had no defined value at the last bar
    Undefined(&'static str),
    /// Rejected by the volatility / volume pre-filter
    MarketFilter { volatility: f64, volume_ratio: f64 },
    /// No EMA crossover inside its RSI band
    NoSetup,
    /// A setup formed but scored below the minimum
    LowConfidence { direction: Direction, confidence: f64 },
    /// Already alerted for this candle
    Duplicate,
    /// ATR of zero leaves no room between entry and stop
    DegenerateRisk,
}

impl fmt::Display for HoldReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientCandles { needed, got } => {
                write!(f, "not enough candles ({} < {})", got, needed)
            }
            Self::Undefined(indicator) => write!(f, "{} undefined", indicator),
            Self::MarketFilter { volatility, volume_ratio } => write!(
                f,
                "volatility or volume filter failed (vol {:.4}, volume ratio {:.2})",
                volatility, volume_ratio
            ),
            Self::NoSetup => write!(f, "no crossover setup"),
            Self::LowConfidence { direction, confidence } => {
                write!(f, "{} setup too weak ({:.1})", direction, confidence)
            }
            Self::Duplicate => write!(f, "duplicate alert"),
            Self::DegenerateRisk => write!(f, "zero ATR"),
        }
    }
}

/// Evaluator outcome for one symbol
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Signal(Signal),
    Hold(HoldReason),
}

impl Decision {
    pub fn signal(&self) -> Option<&Signal> {
        match self {
            Self::Signal(signal) => Some(signal),
            Self::Hold(_) => None,
        }
    }

    pub fn into_signal(self) -> Option<Signal> {
        match self {
            Self::Signal(signal) => Some(signal),
            Self::Hold(_) => None,
        }
    }

    pub fn is_hold(&self) -> bool {
        matches!(self, Self::Hold(_))
    }
}
