//! Polling driver: rank symbols, evaluate each, journal and alert

use crate::services::alert::{format_error, format_quiet_notice, format_signal};
use crate::services::notifier::Notifier;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use scalper_core::data::SignalJournal;
use scalper_core::exchange::MarketData;
use scalper_core::strategy::{AlertDedup, Decision, Signal, SignalEvaluator};
use shared::Config;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Polling settings, fixed for the process lifetime
#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub quote_asset: String,
    pub top_symbols: usize,
    pub entry_interval: String,
    pub trend_interval: String,
    pub lookback_candles: usize,
    pub check_every: Duration,
    pub quiet_notice_every: Duration,
}

impl ScanSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            quote_asset: config.quote_asset.clone(),
            top_symbols: config.top_symbols,
            entry_interval: config.entry_interval.clone(),
            trend_interval: config.trend_interval.clone(),
            lookback_candles: config.lookback_candles,
            check_every: config.check_every,
            quiet_notice_every: config.quiet_notice_every,
        }
    }
}

/// Outcome of one polling cycle
#[derive(Debug, Default)]
pub struct CycleReport {
    pub scanned: usize,
    pub failed: usize,
    pub signals: Vec<Signal>,
    pub quiet_notice_sent: bool,
}

pub struct Scanner {
    market: Box<dyn MarketData>,
    notifier: Box<dyn Notifier>,
    journal: SignalJournal,
    evaluator: SignalEvaluator,
    dedup: AlertDedup,
    settings: ScanSettings,
    last_quiet_notice: Option<DateTime<Utc>>,
}

impl Scanner {
    pub fn new(
        market: Box<dyn MarketData>,
        notifier: Box<dyn Notifier>,
        journal: SignalJournal,
        evaluator: SignalEvaluator,
        settings: ScanSettings,
    ) -> Self {
        Self {
            market,
            notifier,
            journal,
            evaluator,
            dedup: AlertDedup::new(),
            settings,
            last_quiet_notice: None,
        }
    }

    /// Poll forever, one cycle every `check_every`
    pub async fn run(&mut self) {
        loop {
            self.tick(Utc::now()).await;
            debug!("Waiting {:?} until next scan", self.settings.check_every);
            tokio::time::sleep(self.settings.check_every).await;
        }
    }

    /// One cycle; a failure is logged and reported to the channel, never propagated
    pub async fn tick(&mut self, now: DateTime<Utc>) -> Option<CycleReport> {
        match self.run_cycle(now).await {
            Ok(report) => Some(report),
            Err(e) => {
                error!("Scan cycle failed: {:#}", e);
                self.notify(&format_error(&format!("{:#}", e))).await;
                None
            }
        }
    }

    pub async fn run_cycle(&mut self, now: DateTime<Utc>) -> Result<CycleReport> {
        let symbols = self
            .market
            .top_symbols(&self.settings.quote_asset, self.settings.top_symbols)
            .await
            .context("Failed to fetch top symbols")?;
        info!(
            "🔎 Scanning top {} {} pairs by volume",
            symbols.len(),
            self.settings.quote_asset
        );

        let mut report = CycleReport::default();
        for symbol in &symbols {
            report.scanned += 1;
            match self.check_symbol(symbol).await {
                Ok(Decision::Signal(signal)) => {
                    self.dispatch(&signal).await;
                    report.signals.push(signal);
                }
                Ok(Decision::Hold(reason)) => debug!("{}: {}", symbol, reason),
                Err(e) => {
                    warn!("Skipping {}: {:#}", symbol, e);
                    report.failed += 1;
                }
            }
        }

        if report.signals.is_empty() {
            info!("No entries found in this check.");
            // A cycle where every fetch failed says nothing about the market
            if report.failed < report.scanned && self.quiet_notice_due(now) {
                self.notify(&format_quiet_notice()).await;
                self.last_quiet_notice = Some(now);
                report.quiet_notice_sent = true;
            }
        }

        Ok(report)
    }

    async fn check_symbol(&mut self, symbol: &str) -> Result<Decision> {
        let entry = self
            .market
            .candles(symbol, &self.settings.entry_interval, self.settings.lookback_candles)
            .await
            .with_context(|| format!("{} klines", self.settings.entry_interval))?;
        let trend = self
            .market
            .candles(symbol, &self.settings.trend_interval, self.settings.lookback_candles)
            .await
            .with_context(|| format!("{} klines", self.settings.trend_interval))?;

        Ok(self
            .evaluator
            .evaluate(symbol, &entry, &trend, &mut self.dedup)?)
    }

    async fn dispatch(&self, signal: &Signal) {
        if let Err(e) = self.journal.append(signal) {
            error!("Failed to log signal for {}: {:#}", signal.symbol, e);
        }
        if self.notify(&format_signal(signal)).await {
            info!(
                "✅ {} alert sent for {} @ {} (confidence {:.1})",
                signal.direction, signal.symbol, signal.entry_price, signal.confidence
            );
        }
    }

    /// Deliver one message; `false` when the send failed (already logged)
    async fn notify(&self, text: &str) -> bool {
        match self.notifier.send(text).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to send Telegram message: {:#}", e);
                false
            }
        }
    }

    fn quiet_notice_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_quiet_notice {
            None => true,
            Some(last) => (now - last)
                .to_std()
                .map(|elapsed| elapsed > self.settings.quiet_notice_every)
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use scalper_core::config::EvaluatorConfig;
    use scalper_core::data::Candle;
    use scalper_core::exchange::{ExchangeError, Ticker24h};
    use scalper_core::strategy::{ConfidenceLevel, Direction, Trend};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct FakeMarket {
        tickers: Option<Vec<Ticker24h>>,
        broken: Vec<String>,
        /// Canned windows by interval; any other interval is a flat market
        windows: HashMap<String, Vec<Candle>>,
    }

    #[async_trait]
    impl MarketData for FakeMarket {
        async fn tickers_24h(&self) -> Result<Vec<Ticker24h>, ExchangeError> {
            self.tickers.clone().ok_or_else(|| ExchangeError::Api {
                status: 418,
                body: "banned".to_string(),
            })
        }

        async fn candles(
            &self,
            symbol: &str,
            interval: &str,
            limit: usize,
        ) -> Result<Vec<Candle>, ExchangeError> {
            if self.broken.iter().any(|s| s == symbol) {
                return Err(ExchangeError::Malformed("kline row with 2 fields".to_string()));
            }
            if let Some(window) = self.windows.get(interval) {
                return Ok(window.clone());
            }
            Ok(bars_to_candles(
                symbol,
                interval,
                std::iter::repeat((32.0, 1000.0)).take(limit),
            ))
        }
    }

    fn bars_to_candles(
        symbol: &str,
        interval: &str,
        bars: impl IntoIterator<Item = (f64, f64)>,
    ) -> Vec<Candle> {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        bars.into_iter()
            .enumerate()
            .map(|(i, (close, volume))| {
                Candle::new(
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    volume,
                    start + ChronoDuration::minutes(5 * i as i64),
                    symbol.to_string(),
                    interval.to_string(),
                )
            })
            .collect()
    }

    /// Heavy bars at 103, a choppy drift lower from 100, then an up-close on
    /// a volume spike that crosses the fast EMA over the slow one
    fn breakout_window() -> Vec<Candle> {
        let mut bars: Vec<(f64, f64)> = (0..49)
            .map(|i| {
                if i < 3 {
                    return (103.0, 100_000.0);
                }
                let drift = 100.0 - 0.01 * (i - 3) as f64;
                let close = if i >= 34 && i % 2 == 0 { drift - 0.5 } else { drift };
                (close, 1000.0)
            })
            .collect();
        let spike = bars[48].0 + 3.0;
        bars.push((spike, 3000.0));
        bars_to_candles("BTCUSDT", "5m", bars)
    }

    fn rising_trend() -> Vec<Candle> {
        bars_to_candles("BTCUSDT", "15m", (0..50).map(|i| (100.0 + 0.5 * i as f64, 1000.0)))
    }

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send(&self, _text: &str) -> Result<()> {
            Err(anyhow::anyhow!("Bad Request: chat not found"))
        }
    }

    fn ticker(symbol: &str, quote_volume: f64) -> Ticker24h {
        Ticker24h {
            symbol: symbol.to_string(),
            quote_volume,
        }
    }

    fn settings() -> ScanSettings {
        ScanSettings {
            quote_asset: "USDT".to_string(),
            top_symbols: 15,
            entry_interval: "5m".to_string(),
            trend_interval: "15m".to_string(),
            lookback_candles: 50,
            check_every: Duration::from_secs(300),
            quiet_notice_every: Duration::from_secs(1500),
        }
    }

    fn scanner(
        market: FakeMarket,
        notifier: impl Notifier + 'static,
        journal: SignalJournal,
    ) -> Scanner {
        Scanner::new(
            Box::new(market),
            Box::new(notifier),
            journal,
            SignalEvaluator::new(EvaluatorConfig::enhanced()).unwrap(),
            settings(),
        )
    }

    fn sell_signal() -> Signal {
        Signal {
            symbol: "SOLUSDT".to_string(),
            direction: Direction::Sell,
            entry_price: 150.0,
            stop_loss: 151.2,
            take_profit: 148.0,
            confidence: 4.0,
            confidence_level: ConfidenceLevel::High,
            trend: Trend::Down,
            volatility: 0.015,
            risk_reward: 1.67,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            timeframe: "5m".to_string(),
            trend_timeframe: "15m".to_string(),
        }
    }

    #[tokio::test]
    async fn test_symbol_failures_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = RecordingNotifier::default();
        let market = FakeMarket {
            tickers: Some(vec![
                ticker("BTCUSDT", 3.0),
                ticker("ETHUSDT", 2.0),
                ticker("ETHBTC", 9.0),
            ]),
            broken: vec!["ETHUSDT".to_string()],
            ..Default::default()
        };
        let mut scanner = scanner(market, notifier.clone(), SignalJournal::new(dir.path().join("log.csv")));

        let report = scanner.tick(Utc::now()).await.unwrap();
        assert_eq!(report.scanned, 2);
        assert_eq!(report.failed, 1);
        assert!(report.signals.is_empty());
        assert!(report.quiet_notice_sent);
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_quiet_notice_when_every_symbol_failed() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = RecordingNotifier::default();
        let market = FakeMarket {
            tickers: Some(vec![ticker("BTCUSDT", 3.0), ticker("ETHUSDT", 2.0)]),
            broken: vec!["BTCUSDT".to_string(), "ETHUSDT".to_string()],
            ..Default::default()
        };
        let mut scanner = scanner(market, notifier.clone(), SignalJournal::new(dir.path().join("log.csv")));

        let report = scanner.tick(Utc::now()).await.unwrap();
        assert_eq!(report.scanned, 2);
        assert_eq!(report.failed, 2);
        assert!(!report.quiet_notice_sent);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quiet_notice_is_throttled() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = RecordingNotifier::default();
        let market = FakeMarket {
            tickers: Some(vec![ticker("BTCUSDT", 1.0)]),
            ..Default::default()
        };
        let mut scanner = scanner(market, notifier.clone(), SignalJournal::new(dir.path().join("log.csv")));
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        assert!(scanner.tick(t0).await.unwrap().quiet_notice_sent);
        assert!(!scanner.tick(t0 + ChronoDuration::minutes(5)).await.unwrap().quiet_notice_sent);
        assert!(!scanner.tick(t0 + ChronoDuration::seconds(1500)).await.unwrap().quiet_notice_sent);
        assert!(scanner.tick(t0 + ChronoDuration::seconds(1501)).await.unwrap().quiet_notice_sent);

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].contains("No high-quality entry signals"));
    }

    #[tokio::test]
    async fn test_cycle_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = RecordingNotifier::default();
        let market = FakeMarket::default();
        let mut scanner = scanner(market, notifier.clone(), SignalJournal::new(dir.path().join("log.csv")));

        assert!(scanner.tick(Utc::now()).await.is_none());
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("🔴 <b>Bot Error:</b> Failed to fetch top symbols"));
    }

    #[tokio::test]
    async fn test_breakout_alerts_once_across_cycles() {
        let dir = tempfile::tempdir().unwrap();
        let journal = SignalJournal::new(dir.path().join("log.csv"));
        let notifier = RecordingNotifier::default();
        let market = FakeMarket {
            tickers: Some(vec![ticker("BTCUSDT", 1.0)]),
            windows: HashMap::from([
                ("5m".to_string(), breakout_window()),
                ("15m".to_string(), rising_trend()),
            ]),
            ..Default::default()
        };
        let mut scanner = scanner(market, notifier.clone(), journal.clone());
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 4, 10, 0).unwrap();

        let first = scanner.tick(t0).await.unwrap();
        assert_eq!(first.signals.len(), 1);
        assert_eq!(first.signals[0].direction, Direction::Buy);
        assert!(!first.quiet_notice_sent);

        // Same closed candle on the next poll
        let second = scanner.tick(t0 + ChronoDuration::minutes(5)).await.unwrap();
        assert!(second.signals.is_empty());

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.iter().filter(|m| m.contains("BUY SIGNAL")).count(), 1);
        assert!(sent[0].starts_with("🟢 <b>BUY SIGNAL</b> - <code>BTCUSDT</code>"));
        let records = journal.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].direction, "BUY");
    }

    #[tokio::test]
    async fn test_dispatch_journals_and_alerts() {
        let dir = tempfile::tempdir().unwrap();
        let journal = SignalJournal::new(dir.path().join("log.csv"));
        let notifier = RecordingNotifier::default();
        let scanner = scanner(FakeMarket::default(), notifier.clone(), journal.clone());

        scanner.dispatch(&sell_signal()).await;

        assert_eq!(journal.records().unwrap().len(), 1);
        let sent = notifier.sent.lock().unwrap();
        assert!(sent[0].starts_with("🔴 <b>SELL SIGNAL</b> - <code>SOLUSDT</code>"));
    }

    #[tokio::test]
    async fn test_failed_delivery_is_reported_and_still_journaled() {
        let dir = tempfile::tempdir().unwrap();
        let journal = SignalJournal::new(dir.path().join("log.csv"));
        let failing = scanner(FakeMarket::default(), FailingNotifier, journal.clone());

        assert!(!failing.notify("hello").await);
        failing.dispatch(&sell_signal()).await;
        assert_eq!(journal.records().unwrap().len(), 1);

        let recording = RecordingNotifier::default();
        let delivering = scanner(
            FakeMarket::default(),
            recording.clone(),
            SignalJournal::new(dir.path().join("other.csv")),
        );
        assert!(delivering.notify("hello").await);
        assert_eq!(*recording.sent.lock().unwrap(), vec!["hello".to_string()]);
    }
}
