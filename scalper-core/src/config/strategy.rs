//! Signal evaluator configuration

use crate::config::RiskConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule set the evaluator runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalMode {
    /// Crossover + RSI band with plain ATR risk levels
    Base,
    /// Base rules plus market filters, volume bonus and volatility-scaled risk levels
    Enhanced,
}

impl FromStr for SignalMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base" => Ok(Self::Base),
            "enhanced" => Ok(Self::Enhanced),
            other => Err(anyhow::anyhow!("Unknown signal mode: {}", other)),
        }
    }
}

impl fmt::Display for SignalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Enhanced => write!(f, "enhanced"),
        }
    }
}

/// Exclusive RSI band a crossover must fall into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiBand {
    pub lower: f64,
    pub upper: f64,
}

impl RsiBand {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Strictly inside the band
    pub fn contains(&self, rsi: f64) -> bool {
        rsi > self.lower && rsi < self.upper
    }
}

/// Evaluator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Fast EMA period on the entry timeframe
    pub fast_ema: usize,
    /// Slow EMA period on the entry timeframe
    pub slow_ema: usize,
    /// RSI period
    pub rsi_period: usize,
    /// Bollinger Bands period
    pub bb_period: usize,
    /// Bollinger Bands standard deviation multiplier
    pub bb_std_dev: f64,
    /// ATR period
    pub atr_period: usize,
    /// Rolling window for return volatility
    pub volatility_period: usize,
    /// Rolling window for the volume ratio
    pub volume_period: usize,
    /// Fast EMA period on the trend timeframe
    pub trend_fast_ema: usize,
    /// Slow EMA period on the trend timeframe
    pub trend_slow_ema: usize,
    /// RSI band for BUY crossovers
    pub buy_rsi: RsiBand,
    /// RSI band for SELL crossovers
    pub sell_rsi: RsiBand,
    /// Close must be below `lower band * buffer` for the BUY band bonus
    pub buy_band_buffer: f64,
    /// Close must be above `upper band * buffer` for the SELL band bonus
    pub sell_band_buffer: f64,
    /// Maximum return volatility before a symbol is skipped
    pub volatility_threshold: f64,
    /// Minimum current/average volume ratio
    pub min_volume_multiplier: f64,
    /// Minimum confidence score for a signal to be emitted
    pub min_confidence: f64,
    /// Skip symbols failing the volatility / volume filters
    pub market_filters: bool,
    /// Add half a point when volume exceeds the minimum multiplier
    pub volume_bonus: bool,
    /// Scale ATR multipliers by the current volatility
    pub volatility_adjusted_risk: bool,
    /// Stop-loss / take-profit settings
    pub risk: RiskConfig,
}

impl EvaluatorConfig {
    /// Full rule set with filters and volatility-scaled risk levels
    pub fn enhanced() -> Self {
        Self {
            fast_ema: 9,
            slow_ema: 30,
            rsi_period: 14,
            bb_period: 20,
            bb_std_dev: 2.0,
            atr_period: 14,
            volatility_period: 20,
            volume_period: 20,
            trend_fast_ema: 30,
            trend_slow_ema: 90,
            buy_rsi: RsiBand::new(45.0, 70.0),
            sell_rsi: RsiBand::new(30.0, 55.0),
            buy_band_buffer: 1.002,
            sell_band_buffer: 0.998,
            volatility_threshold: 0.02,
            min_volume_multiplier: 1.5,
            min_confidence: 3.0,
            market_filters: true,
            volume_bonus: true,
            volatility_adjusted_risk: true,
            risk: RiskConfig::default(),
        }
    }

    /// Crossover rules only: no filters, no volume bonus, no band buffer
    pub fn base() -> Self {
        Self {
            buy_band_buffer: 1.0,
            sell_band_buffer: 1.0,
            market_filters: false,
            volume_bonus: false,
            volatility_adjusted_risk: false,
            ..Self::enhanced()
        }
    }

    /// Preset for a mode
    pub fn for_mode(mode: SignalMode) -> Self {
        match mode {
            SignalMode::Base => Self::base(),
            SignalMode::Enhanced => Self::enhanced(),
        }
    }

    /// Candles the entry window needs for every rolling indicator to be defined
    pub fn min_entry_candles(&self) -> usize {
        [
            self.rsi_period,
            self.bb_period,
            self.atr_period,
            self.volatility_period,
            self.volume_period,
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
            + 1
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self::enhanced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("enhanced".parse::<SignalMode>().unwrap(), SignalMode::Enhanced);
        assert_eq!(" BASE ".parse::<SignalMode>().unwrap(), SignalMode::Base);
        assert!("aggressive".parse::<SignalMode>().is_err());
    }

    #[test]
    fn test_base_keeps_periods_and_drops_filters() {
        let base = EvaluatorConfig::base();
        let enhanced = EvaluatorConfig::enhanced();
        assert_eq!(base.fast_ema, enhanced.fast_ema);
        assert_eq!(base.risk, enhanced.risk);
        assert!(!base.market_filters && !base.volume_bonus && !base.volatility_adjusted_risk);
        assert_eq!(EvaluatorConfig::for_mode(SignalMode::Enhanced), enhanced);
    }

    #[test]
    fn test_min_entry_candles() {
        // Largest rolling window is 20 (BB / volatility / volume), plus one delta
        assert_eq!(EvaluatorConfig::enhanced().min_entry_candles(), 21);
    }

    #[test]
    fn test_rsi_band_is_exclusive() {
        let band = RsiBand::new(45.0, 70.0);
        assert!(band.contains(55.0));
        assert!(!band.contains(45.0));
        assert!(!band.contains(70.0));
        assert!(!band.contains(75.0));
    }
}
