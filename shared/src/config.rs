use anyhow::{anyhow, Context};
use dotenv::dotenv;
use scalper_core::config::{EvaluatorConfig, SignalMode};
use scalper_core::exchange::DEFAULT_BASE_URL;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub struct Config {
    pub bot_token: String,
    pub chat_id: i64,
    pub binance_base_url: String,
    pub quote_asset: String,
    pub top_symbols: usize,
    pub entry_interval: String,
    pub trend_interval: String,
    pub lookback_candles: usize,
    pub check_every: Duration,
    pub quiet_notice_every: Duration,
    pub request_timeout: Duration,
    pub log_file: PathBuf,
    pub signal_mode: SignalMode,
    pub evaluator: EvaluatorConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup (environment, map, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let signal_mode: SignalMode = parse_or(&var, "SIGNAL_MODE", SignalMode::Enhanced)?;
        let mut evaluator = EvaluatorConfig::for_mode(signal_mode);
        evaluator.volatility_threshold =
            parse_or(&var, "VOLATILITY_THRESHOLD", evaluator.volatility_threshold)?;
        evaluator.min_volume_multiplier =
            parse_or(&var, "MIN_VOLUME_MULTIPLIER", evaluator.min_volume_multiplier)?;
        evaluator.min_confidence = parse_or(&var, "MIN_CONFIDENCE", evaluator.min_confidence)?;
        evaluator.risk.atr_multiplier_sl =
            parse_or(&var, "ATR_MULTIPLIER_SL", evaluator.risk.atr_multiplier_sl)?;
        evaluator.risk.atr_multiplier_tp =
            parse_or(&var, "ATR_MULTIPLIER_TP", evaluator.risk.atr_multiplier_tp)?;

        if evaluator.volatility_threshold <= 0.0 {
            return Err(anyhow!("VOLATILITY_THRESHOLD must be positive"));
        }

        let lookback_candles = parse_or(&var, "LOOKBACK_CANDLES", 50usize)?;
        if lookback_candles < evaluator.min_entry_candles() {
            return Err(anyhow!(
                "LOOKBACK_CANDLES must be at least {}",
                evaluator.min_entry_candles()
            ));
        }

        let config = Config {
            bot_token: var("BOT_TOKEN").context("BOT_TOKEN must be set")?,
            chat_id: var("CHAT_ID")
                .context("CHAT_ID must be set")?
                .trim()
                .parse::<i64>()
                .context("CHAT_ID must be a numeric chat id")?,
            binance_base_url: var("BINANCE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            quote_asset: var("QUOTE_ASSET").unwrap_or_else(|| "USDT".to_string()),
            top_symbols: parse_or(&var, "TOP_SYMBOLS", 15)?,
            entry_interval: var("ENTRY_INTERVAL").unwrap_or_else(|| "5m".to_string()),
            trend_interval: var("TREND_INTERVAL").unwrap_or_else(|| "15m".to_string()),
            lookback_candles,
            check_every: Duration::from_secs(parse_or(&var, "CHECK_EVERY_SECS", 300)?),
            quiet_notice_every: Duration::from_secs(parse_or(&var, "QUIET_NOTICE_SECS", 1500)?),
            request_timeout: Duration::from_secs(parse_or(&var, "REQUEST_TIMEOUT_SECS", 10)?),
            log_file: var("LOG_FILE")
                .unwrap_or_else(|| "enhanced_scalping_signals.csv".to_string())
                .into(),
            signal_mode,
            evaluator,
        };

        debug!(
            "Loaded config: mode={}, top={} {} pairs, {}/{} x{}",
            config.signal_mode,
            config.top_symbols,
            config.quote_asset,
            config.entry_interval,
            config.trend_interval,
            config.lookback_candles
        );
        Ok(config)
    }

    /// Evaluator settings for the configured mode, overrides applied
    pub fn evaluator_config(&self) -> EvaluatorConfig {
        self.evaluator.clone()
    }
}

fn parse_or<T>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid {}={:?}: {}", key, raw, e)),
        None => Ok(default),
    }
}
