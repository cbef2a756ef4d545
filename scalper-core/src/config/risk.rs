//! Stop-loss / take-profit configuration

use serde::{Deserialize, Serialize};

/// Risk level configuration used when a signal is emitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// ATR multiple between entry and stop loss
    pub atr_multiplier_sl: f64,
    /// ATR multiple between entry and take profit
    pub atr_multiplier_tp: f64,
    /// Lower clamp of the volatility adjustment factor
    pub min_volatility_adjustment: f64,
    /// Upper clamp of the volatility adjustment factor
    pub max_volatility_adjustment: f64,
    /// Decimal places stop loss and take profit are rounded to
    pub price_decimals: u32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            atr_multiplier_sl: 1.5,
            atr_multiplier_tp: 2.5,
            min_volatility_adjustment: 0.5,
            max_volatility_adjustment: 2.0,
            price_decimals: 6,
        }
    }
}

impl RiskConfig {
    /// Scale factor applied to both ATR multipliers.
    ///
    /// `volatility / threshold`, clamped to the configured bounds.
    pub fn volatility_adjustment(&self, volatility: f64, threshold: f64) -> f64 {
        (volatility / threshold).clamp(self.min_volatility_adjustment, self.max_volatility_adjustment)
    }
}
