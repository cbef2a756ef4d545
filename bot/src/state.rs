use crate::services::notifier::TelegramNotifier;
use crate::services::scanner::{ScanSettings, Scanner};
use scalper_core::data::SignalJournal;
use scalper_core::exchange::BinanceClient;
use scalper_core::strategy::SignalEvaluator;
use shared::Config;

pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new() -> Result<Self, anyhow::Error> {
        let config = Config::from_env()?;
        Ok(AppState { config })
    }

    /// Wire the live Binance source and Telegram sink into a scanner
    pub fn build_scanner(&self) -> Result<Scanner, anyhow::Error> {
        let config = &self.config;
        let market = BinanceClient::new(&config.binance_base_url, config.request_timeout)?;
        tracing::info!("📡 Market data from {}", market.base_url());
        let notifier =
            TelegramNotifier::new(&config.bot_token, config.chat_id, config.request_timeout)?;
        let evaluator = SignalEvaluator::new(config.evaluator_config())?;

        Ok(Scanner::new(
            Box::new(market),
            Box::new(notifier),
            SignalJournal::new(&config.log_file),
            evaluator,
            ScanSettings::from_config(config),
        ))
    }
}
