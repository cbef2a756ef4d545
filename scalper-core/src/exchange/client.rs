//! Binance spot REST client (public endpoints only)

use crate::data::Candle;
use crate::exchange::{ExchangeError, MarketData, Ticker24h};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Raw `/api/v3/ticker/24hr` entry; Binance sends numbers as strings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTicker {
    symbol: String,
    quote_volume: String,
}

/// Binance market data over plain HTTP
#[derive(Debug, Clone)]
pub struct BinanceClient {
    base_url: String,
    client: Client,
}

impl BinanceClient {
    /// Create a client; every request is bounded by `timeout`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ExchangeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ExchangeError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MarketData for BinanceClient {
    async fn tickers_24h(&self) -> Result<Vec<Ticker24h>, ExchangeError> {
        let raw: Vec<RawTicker> = self.get("/api/v3/ticker/24hr", &[]).await?;
        parse_tickers(raw)
    }

    async fn candles(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, ExchangeError> {
        debug!("Fetching {} klines for {}...", interval, symbol);
        let rows: Vec<Vec<Value>> = self
            .get(
                "/api/v3/klines",
                &[
                    ("symbol", symbol.to_string()),
                    ("interval", interval.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        rows.iter()
            .map(|row| parse_kline(row, symbol, interval))
            .collect()
    }
}

fn parse_tickers(raw: Vec<RawTicker>) -> Result<Vec<Ticker24h>, ExchangeError> {
    raw.into_iter()
        .map(|t| {
            let quote_volume = t.quote_volume.parse::<f64>().map_err(|_| {
                ExchangeError::Malformed(format!("quoteVolume {:?} for {}", t.quote_volume, t.symbol))
            })?;
            Ok(Ticker24h {
                symbol: t.symbol,
                quote_volume,
            })
        })
        .collect()
}

/// Decode one kline row: `[open_time_ms, "open", "high", "low", "close", "volume", ...]`
fn parse_kline(row: &[Value], symbol: &str, interval: &str) -> Result<Candle, ExchangeError> {
    if row.len() < 6 {
        return Err(ExchangeError::Malformed(format!(
            "kline row with {} fields",
            row.len()
        )));
    }

    let open_time = row[0]
        .as_i64()
        .ok_or_else(|| ExchangeError::Malformed(format!("kline open time {}", row[0])))?;
    let timestamp: DateTime<Utc> = DateTime::from_timestamp_millis(open_time)
        .ok_or_else(|| ExchangeError::Malformed(format!("kline open time {}", open_time)))?;

    Ok(Candle::new(
        number(&row[1], "open")?,
        number(&row[2], "high")?,
        number(&row[3], "low")?,
        number(&row[4], "close")?,
        number(&row[5], "volume")?,
        timestamp,
        symbol.to_string(),
        interval.to_string(),
    ))
}

fn number(value: &Value, field: &str) -> Result<f64, ExchangeError> {
    match value {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
    .ok_or_else(|| ExchangeError::Malformed(format!("kline {} {}", field, value)))
}
