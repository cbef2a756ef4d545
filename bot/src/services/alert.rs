//! Telegram HTML rendering of alerts

use scalper_core::strategy::{Direction, Signal};
use std::fmt::Display;
use teloxide::utils::html;

/// Longest error text forwarded to the channel
const MAX_ERROR_CHARS: usize = 100;

pub fn format_signal(signal: &Signal) -> String {
    let icon = match signal.direction {
        Direction::Buy => "🟢",
        Direction::Sell => "🔴",
    };

    format!(
        "{} <b>{} SIGNAL</b> - <code>{}</code> @ {}\n\
🛑 <b>SL:</b> <code>{}</code> | 🎯 <b>TP:</b> <code>{}</code>\n\
⚖️ <b>Risk:Reward</b> = 1:{:.2}\n\
📊 <b>Confidence:</b> <b>{}</b> ({:.1}/5)\n\
📈 <b>Trend:</b> <b>{}</b> ({}) | Vol: {:.4}\n\
⏰ <b>Timeframe:</b> {} | {}",
        icon,
        signal.direction,
        html::escape(&signal.symbol),
        signal.entry_price,
        signal.stop_loss,
        signal.take_profit,
        signal.risk_reward,
        signal.confidence_level,
        signal.confidence,
        signal.trend,
        html::escape(&signal.trend_timeframe),
        signal.volatility,
        html::escape(&signal.timeframe),
        signal.timestamp.format("%Y-%m-%d %H:%M"),
    )
}

pub fn format_quiet_notice() -> String {
    "⚠️ No high-quality entry signals found in recent checks.".to_string()
}

/// Error report, cut to the first 100 characters
pub fn format_error(error: &impl Display) -> String {
    let text: String = error.to_string().chars().take(MAX_ERROR_CHARS).collect();
    format!("🔴 <b>Bot Error:</b> {}...", html::escape(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use scalper_core::strategy::{ConfidenceLevel, Trend};

    fn signal() -> Signal {
        Signal {
            symbol: "BTCUSDT".to_string(),
            direction: Direction::Buy,
            entry_price: 100.0,
            stop_loss: 99.4,
            take_profit: 101.0,
            confidence: 4.5,
            confidence_level: ConfidenceLevel::VeryHigh,
            trend: Trend::Up,
            volatility: 0.01234,
            risk_reward: 1.67,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            timeframe: "5m".to_string(),
            trend_timeframe: "15m".to_string(),
        }
    }

    #[test]
    fn test_format_signal() {
        let text = format_signal(&signal());
        assert!(text.starts_with("🟢 <b>BUY SIGNAL</b> - <code>BTCUSDT</code> @ 100"));
        assert!(text.contains("<code>99.4</code>"));
        assert!(text.contains("1:1.67"));
        assert!(text.contains("<b>Very High</b> (4.5/5)"));
        assert!(text.contains("<b>up</b> (15m) | Vol: 0.0123"));
        assert!(text.ends_with("5m | 2024-05-01 12:00"));
    }

    #[test]
    fn test_format_error_truncates_and_escapes() {
        let long = format!("<timeout> {}", "x".repeat(300));
        let text = format_error(&long);
        assert!(text.contains("&lt;timeout&gt;"));
        assert!(!text.contains(&"x".repeat(100)));
        assert!(text.ends_with("..."));
    }
}
