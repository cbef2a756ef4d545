//! Exchange integration module
//!
//! Read-only market data: 24h tickers for symbol selection and kline
//! windows for the evaluator. [`MarketData`] is the seam the bot polls
//! through, so tests can swap in canned candles.

pub mod client;

pub use client::*;

use crate::data::Candle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Market data fetch / decode errors
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// 24-hour ticker statistics, reduced to what symbol ranking needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker24h {
    pub symbol: String,
    /// Traded value over the last 24h, in the quote asset
    pub quote_volume: f64,
}

/// Source of tickers and candle windows
#[async_trait]
pub trait MarketData: Send + Sync {
    /// 24h statistics for every listed symbol
    async fn tickers_24h(&self) -> Result<Vec<Ticker24h>, ExchangeError>;

    /// Last `limit` candles of `symbol` at `interval`, oldest first
    async fn candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, ExchangeError>;

    /// Top `n` symbols quoted in `quote_asset`, by 24h quote volume
    async fn top_symbols(&self, quote_asset: &str, n: usize) -> Result<Vec<String>, ExchangeError> {
        let tickers = self.tickers_24h().await?;
        Ok(rank_by_quote_volume(tickers, quote_asset, n))
    }
}

/// Keep symbols ending in `quote_asset`, sort by quote volume descending,
/// take the first `n`. Ties keep their listing order.
pub fn rank_by_quote_volume(tickers: Vec<Ticker24h>, quote_asset: &str, n: usize) -> Vec<String> {
    let mut tickers: Vec<Ticker24h> = tickers
        .into_iter()
        .filter(|t| t.symbol.ends_with(quote_asset))
        .collect();
    tickers.sort_by(|a, b| {
        b.quote_volume
            .partial_cmp(&a.quote_volume)
            .unwrap_or(Ordering::Equal)
    });
    tickers.into_iter().take(n).map(|t| t.symbol).collect()
}
