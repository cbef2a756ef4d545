//! Signal evaluator: EMA crossover + RSI band, scored by confirmations

use crate::config::EvaluatorConfig;
use crate::data::{closes, Candle};
use crate::indicators::{
    calculate_atr, calculate_bollinger, calculate_ema, calculate_rsi, check_period, last_value,
    volatility, volume_ratio, vwap, IndicatorError,
};
use crate::strategy::{
    AlertDedup, ConfidenceLevel, Decision, Direction, HoldReason, RiskLevels, Signal, Trend,
    TrendClassifier,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Indicator values at the last bar of the entry window.
///
/// Rolling values are `None` while undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub candle_time: DateTime<Utc>,
    pub close: f64,
    pub fast_ema_prev: f64,
    pub slow_ema_prev: f64,
    pub fast_ema: f64,
    pub slow_ema: f64,
    pub rsi: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub vwap: Option<f64>,
    pub atr: Option<f64>,
    pub volatility: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub trend: Trend,
    pub timeframe: String,
    pub trend_timeframe: String,
}

impl IndicatorSnapshot {
    /// Fast EMA moved from below to above the slow EMA on the last bar
    pub fn crossed_up(&self) -> bool {
        self.fast_ema_prev < self.slow_ema_prev && self.fast_ema > self.slow_ema
    }

    /// Fast EMA moved from above to below the slow EMA on the last bar
    pub fn crossed_down(&self) -> bool {
        self.fast_ema_prev > self.slow_ema_prev && self.fast_ema < self.slow_ema
    }
}

/// Rule-based evaluator shared by the base and enhanced rule sets
#[derive(Debug, Clone)]
pub struct SignalEvaluator {
    config: EvaluatorConfig,
    trend: TrendClassifier,
}

impl SignalEvaluator {
    /// Create an evaluator, rejecting zero periods up front
    pub fn new(config: EvaluatorConfig) -> Result<Self, IndicatorError> {
        check_period("EMA", config.fast_ema)?;
        check_period("EMA", config.slow_ema)?;
        check_period("RSI", config.rsi_period)?;
        check_period("BollingerBands", config.bb_period)?;
        check_period("ATR", config.atr_period)?;
        check_period("Volatility", config.volatility_period)?;
        check_period("VolumeRatio", config.volume_period)?;
        check_period("EMA", config.trend_fast_ema)?;
        check_period("EMA", config.trend_slow_ema)?;

        Ok(Self {
            trend: TrendClassifier::new(config.trend_fast_ema, config.trend_slow_ema),
            config,
        })
    }

    /// Evaluate one symbol from its entry and trend windows
    pub fn evaluate(
        &self,
        symbol: &str,
        entry: &[Candle],
        trend: &[Candle],
        dedup: &mut AlertDedup,
    ) -> Result<Decision, IndicatorError> {
        if let Some(reason) = self.check_windows(entry, trend) {
            debug!("{}: {}", symbol, reason);
            return Ok(Decision::Hold(reason));
        }

        let snapshot = self.compute_snapshot(entry, trend)?;
        Ok(self.decide(symbol, &snapshot, dedup))
    }

    /// Indicator snapshot, or `None` when a window is too short
    pub fn snapshot(
        &self,
        entry: &[Candle],
        trend: &[Candle],
    ) -> Result<Option<IndicatorSnapshot>, IndicatorError> {
        if self.check_windows(entry, trend).is_some() {
            return Ok(None);
        }
        self.compute_snapshot(entry, trend).map(Some)
    }

    fn check_windows(&self, entry: &[Candle], trend: &[Candle]) -> Option<HoldReason> {
        let needed = self.config.min_entry_candles();
        if entry.len() < needed {
            return Some(HoldReason::InsufficientCandles {
                needed,
                got: entry.len(),
            });
        }
        if trend.is_empty() {
            return Some(HoldReason::InsufficientCandles { needed: 1, got: 0 });
        }
        None
    }

    fn compute_snapshot(
        &self,
        entry: &[Candle],
        trend: &[Candle],
    ) -> Result<IndicatorSnapshot, IndicatorError> {
        let cfg = &self.config;
        let closes = closes(entry);
        let n = closes.len();

        let fast = calculate_ema(&closes, cfg.fast_ema)?;
        let slow = calculate_ema(&closes, cfg.slow_ema)?;
        let bands = calculate_bollinger(&closes, cfg.bb_period, cfg.bb_std_dev)?
            .last()
            .copied()
            .flatten();
        let last = &entry[n - 1];

        Ok(IndicatorSnapshot {
            candle_time: last.timestamp,
            close: last.close,
            fast_ema_prev: fast[n - 2],
            slow_ema_prev: slow[n - 2],
            fast_ema: fast[n - 1],
            slow_ema: slow[n - 1],
            rsi: last_value(&calculate_rsi(&closes, cfg.rsi_period)?),
            bb_upper: bands.map(|b| b.upper),
            bb_lower: bands.map(|b| b.lower),
            vwap: vwap(entry),
            atr: calculate_atr(entry, cfg.atr_period)?,
            volatility: volatility(entry, cfg.volatility_period)?,
            volume_ratio: volume_ratio(entry, cfg.volume_period)?,
            trend: self.trend.classify(trend)?,
            timeframe: last.timeframe.clone(),
            trend_timeframe: trend[trend.len() - 1].timeframe.clone(),
        })
    }

    /// Apply the decision rule to a snapshot.
    ///
    /// The dedup store is only touched once a signal is about to be emitted.
    pub fn decide(
        &self,
        symbol: &str,
        snapshot: &IndicatorSnapshot,
        dedup: &mut AlertDedup,
    ) -> Decision {
        let cfg = &self.config;

        // Required only by the rules that read them
        let volatility = match snapshot.volatility {
            Some(v) => v,
            None if cfg.market_filters || cfg.volatility_adjusted_risk => {
                return hold(symbol, HoldReason::Undefined("volatility"));
            }
            None => 0.0,
        };
        let volume_ratio = match snapshot.volume_ratio {
            Some(v) => v,
            None if cfg.market_filters || cfg.volume_bonus => {
                return hold(symbol, HoldReason::Undefined("volume ratio"));
            }
            None => 0.0,
        };

        if cfg.market_filters
            && (volatility > cfg.volatility_threshold || volume_ratio < cfg.min_volume_multiplier)
        {
            info!("Skipping {} - volatility or volume filter failed", symbol);
            return Decision::Hold(HoldReason::MarketFilter {
                volatility,
                volume_ratio,
            });
        }

        let Some(rsi) = snapshot.rsi else {
            return hold(symbol, HoldReason::Undefined("RSI"));
        };

        let direction = if snapshot.crossed_up() && cfg.buy_rsi.contains(rsi) {
            Direction::Buy
        } else if snapshot.crossed_down() && cfg.sell_rsi.contains(rsi) {
            Direction::Sell
        } else {
            return hold(symbol, HoldReason::NoSetup);
        };

        let (Some(upper), Some(lower)) = (snapshot.bb_upper, snapshot.bb_lower) else {
            return hold(symbol, HoldReason::Undefined("Bollinger Bands"));
        };
        let Some(vwap) = snapshot.vwap else {
            return hold(symbol, HoldReason::Undefined("VWAP"));
        };

        let close = snapshot.close;
        let mut confidence = 1.0;
        match direction {
            Direction::Buy => {
                if close < lower * cfg.buy_band_buffer {
                    confidence += 1.0;
                }
                if close < vwap {
                    confidence += 1.0;
                }
                if snapshot.trend == Trend::Up {
                    confidence += 1.0;
                }
            }
            Direction::Sell => {
                if close > upper * cfg.sell_band_buffer {
                    confidence += 1.0;
                }
                if close > vwap {
                    confidence += 1.0;
                }
                if snapshot.trend == Trend::Down {
                    confidence += 1.0;
                }
            }
        }
        // With market filters on, the pre-filter already guarantees the
        // minimum volume, so only a ratio exactly at the minimum misses this.
        if cfg.volume_bonus && volume_ratio > cfg.min_volume_multiplier {
            confidence += 0.5;
        }

        if confidence < cfg.min_confidence {
            return hold(
                symbol,
                HoldReason::LowConfidence {
                    direction,
                    confidence,
                },
            );
        }

        let Some(atr) = snapshot.atr else {
            return hold(symbol, HoldReason::Undefined("ATR"));
        };
        let adjustment = if cfg.volatility_adjusted_risk {
            cfg.risk
                .volatility_adjustment(volatility, cfg.volatility_threshold)
        } else {
            1.0
        };
        let Some(levels) = RiskLevels::from_atr(direction, close, atr, adjustment, &cfg.risk) else {
            return hold(symbol, HoldReason::DegenerateRisk);
        };

        if !dedup.record(symbol, snapshot.candle_time) {
            info!("Duplicate alert skipped for {}", symbol);
            return Decision::Hold(HoldReason::Duplicate);
        }

        let signal = Signal {
            symbol: symbol.to_string(),
            direction,
            entry_price: close,
            stop_loss: levels.stop_loss,
            take_profit: levels.take_profit,
            confidence,
            confidence_level: ConfidenceLevel::from_score(confidence),
            trend: snapshot.trend,
            volatility,
            risk_reward: levels.risk_reward,
            timestamp: snapshot.candle_time,
            timeframe: snapshot.timeframe.clone(),
            trend_timeframe: snapshot.trend_timeframe.clone(),
        };
        info!(
            "📊 {} signal for {}: entry={}, sl={}, tp={}, confidence={:.1}",
            signal.direction, symbol, signal.entry_price, signal.stop_loss, signal.take_profit, confidence
        );
        Decision::Signal(signal)
    }
}

fn hold(symbol: &str, reason: HoldReason) -> Decision {
    debug!("No valid signal for {}: {}", symbol, reason);
    Decision::Hold(reason)
}
