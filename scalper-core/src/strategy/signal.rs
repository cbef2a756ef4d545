//! Confidence labels and risk level calculation

use crate::config::RiskConfig;
use crate::strategy::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human label for a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    /// Step function over the score: `>= 4.5` Very High, `>= 4` High,
    /// anything else (NaN included) Medium.
    pub fn from_score(score: f64) -> Self {
        if score >= 4.5 {
            Self::VeryHigh
        } else if score >= 4.0 {
            Self::High
        } else {
            Self::Medium
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::VeryHigh => write!(f, "Very High"),
        }
    }
}

/// Stop loss / take profit around an entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskLevels {
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Reward over risk, rounded to two decimals
    pub risk_reward: f64,
}

impl RiskLevels {
    /// ATR-based levels. `adjustment` scales both ATR multipliers.
    ///
    /// Returns `None` when the rounded stop coincides with the entry.
    pub fn from_atr(
        direction: Direction,
        entry: f64,
        atr: f64,
        adjustment: f64,
        risk: &RiskConfig,
    ) -> Option<Self> {
        let sl_distance = atr * risk.atr_multiplier_sl * adjustment;
        let tp_distance = atr * risk.atr_multiplier_tp * adjustment;

        let (stop_loss, take_profit) = match direction {
            Direction::Buy => (entry - sl_distance, entry + tp_distance),
            Direction::Sell => (entry + sl_distance, entry - tp_distance),
        };
        let stop_loss = round_to(stop_loss, risk.price_decimals);
        let take_profit = round_to(take_profit, risk.price_decimals);

        let risk_amount = (entry - stop_loss).abs();
        if risk_amount == 0.0 {
            return None;
        }
        let risk_reward = round_to((take_profit - entry).abs() / risk_amount, 2);

        Some(Self {
            stop_loss,
            take_profit,
            risk_reward,
        })
    }
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
