//! Unit tests for scalper-core indicators

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use scalper_core::data::Candle;
    use scalper_core::indicators::{
        AverageTrueRange, BollingerBands, Indicator, IndicatorError, EMA, RSI, SMA,
    };

    fn candle(close: f64) -> Candle {
        Candle::new(
            close,
            close + 1.0,
            close - 1.0,
            close,
            1000.0,
            Utc::now(),
            "BTCUSDT".to_string(),
            "5m".to_string(),
        )
    }

    #[test]
    fn test_candle_creation() {
        let candle = Candle::new(
            100.0,
            110.0,
            95.0,
            105.0,
            1000.0,
            Utc::now(),
            "BTCUSDT".to_string(),
            "5m".to_string(),
        );

        assert_eq!(candle.open, 100.0);
        assert_eq!(candle.close, 105.0);
        assert_eq!(candle.range(), 15.0);
        assert_eq!(candle.quote_value(), 105_000.0);
    }

    #[test]
    fn test_rsi_indicator() {
        let mut rsi = RSI::new(14).unwrap();
        assert_eq!(rsi.name(), "RSI");
        assert_eq!(rsi.period(), 14);
        assert!(!rsi.is_ready());

        // Alternate up and down moves so both averages are non-zero
        for i in 0..20 {
            let step = if i % 2 == 0 { 1.0 } else { -0.5 };
            rsi.update(100.0 + i as f64 * step);
        }

        assert!(rsi.is_ready());
        let value = rsi.value().unwrap();
        assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn test_ema_indicator() {
        let mut ema = EMA::new(10).unwrap();
        assert_eq!(ema.name(), "EMA");
        assert_eq!(ema.period(), 10);
        assert!(!ema.is_ready());

        ema.update(100.0);
        // Seeded with the first value
        assert_eq!(ema.value(), Some(100.0));

        for i in 0..20 {
            ema.update(100.0 + (i as f64 * 0.1));
        }
        assert!(ema.is_ready());
    }

    #[test]
    fn test_sma_indicator() {
        let mut sma = SMA::new(10).unwrap();
        assert_eq!(sma.name(), "SMA");
        assert_eq!(sma.period(), 10);
        assert!(!sma.is_ready());

        for i in 0..10 {
            sma.update(i as f64);
        }

        assert!(sma.is_ready());
        assert_eq!(sma.value(), Some(4.5));
    }

    #[test]
    fn test_bollinger_indicator() {
        let mut bb = BollingerBands::new(20, 2.0).unwrap();
        assert!(!bb.is_ready());

        for i in 0..25 {
            bb.update(100.0 + (i % 5) as f64);
        }

        let bands = bb.bands().unwrap();
        assert!(bands.lower < bands.middle && bands.middle < bands.upper);
    }

    #[test]
    fn test_atr_indicator() {
        let mut atr = AverageTrueRange::new(14).unwrap();
        for i in 0..14 {
            atr.update_candle(&candle(100.0 + i as f64 * 0.1));
        }
        // Every candle spans 2.0 and gaps stay inside the range
        let value = atr.value().unwrap();
        assert!((value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_period_rejected() {
        assert_eq!(
            EMA::new(0).unwrap_err(),
            IndicatorError::InvalidPeriod { indicator: "EMA" }
        );
        assert!(RSI::new(0).is_err());
        assert!(SMA::new(0).is_err());
        assert!(BollingerBands::new(0, 2.0).is_err());
        assert!(AverageTrueRange::new(0).is_err());
    }
}
