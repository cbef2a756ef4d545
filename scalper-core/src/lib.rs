//! Scalper-Core: signal engine behind the scalping alert bot
//!
//! This crate holds everything the polling bot needs that is not Telegram
//! specific:
//! - [ta-rs](https://github.com/greyblake/ta-rs) backed technical indicators
//! - a dual-EMA trend classifier for the higher timeframe
//! - the rule-based signal evaluator with its alert dedup gate
//! - an append-only CSV journal of emitted signals
//! - a Binance spot REST client for tickers and klines
//!
//! # Features
//!
//! - **Data**: OHLCV candles, signal journal
//! - **Technical Indicators**: EMA, SMA, RSI, Bollinger Bands, ATR, VWAP,
//!   volatility, volume ratio
//! - **Strategy**: trend classification, signal evaluation, dedup
//! - **Exchange**: market-data source trait and Binance implementation
//!
//! # Example
//!
//! ```no_run
//! use scalper_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = BinanceClient::new("https://api.binance.com", std::time::Duration::from_secs(10))?;
//!     let evaluator = SignalEvaluator::new(EvaluatorConfig::enhanced())?;
//!     let mut dedup = AlertDedup::new();
//!
//!     let entry = client.candles("BTCUSDT", "5m", 50).await?;
//!     let trend = client.candles("BTCUSDT", "15m", 50).await?;
//!     let decision = evaluator.evaluate("BTCUSDT", &entry, &trend, &mut dedup)?;
//!     println!("{:?}", decision);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod exchange;
pub mod indicators;
pub mod strategy;

// Re-export commonly used types
pub mod prelude {
    pub use crate::config::*;
    pub use crate::data::*;
    pub use crate::exchange::*;
    pub use crate::indicators::*;
    pub use crate::strategy::*;

    pub use anyhow::{Context, Result};
}

/// Result type alias
pub type Result<T> = anyhow::Result<T>;
