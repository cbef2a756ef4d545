//! RSI (Relative Strength Index) indicator

use crate::indicators::{check_period, Indicator, IndicatorError, SMA};

/// RSI over simple rolling means of gains and losses.
///
/// Needs `period` price changes (`period + 1` prices) before it is defined.
/// While the average loss is zero the ratio has no finite value and the RSI
/// stays undefined.
#[derive(Debug)]
pub struct RSI {
    gains: SMA,
    losses: SMA,
    period: usize,
    prev_price: Option<f64>,
    last_value: Option<f64>,
}

impl RSI {
    /// Create new RSI indicator
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        check_period("RSI", period)?;
        Ok(Self {
            gains: SMA::new(period)?,
            losses: SMA::new(period)?,
            period,
            prev_price: None,
            last_value: None,
        })
    }

    /// Get RSI period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for RSI {
    fn name(&self) -> &str {
        "RSI"
    }

    fn update(&mut self, value: f64) {
        let Some(prev) = self.prev_price.replace(value) else {
            return;
        };

        let change = value - prev;
        self.gains.update(change.max(0.0));
        self.losses.update((-change).max(0.0));

        self.last_value = match (self.gains.value(), self.losses.value()) {
            (Some(avg_gain), Some(avg_loss)) if avg_loss > 0.0 => {
                // Rolling sums can drift a hair below zero
                let rs = avg_gain.max(0.0) / avg_loss;
                Some(100.0 - 100.0 / (1.0 + rs))
            }
            _ => None,
        };
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.gains.is_ready()
    }
}

/// Calculate RSI from a series of values
pub fn calculate_rsi(values: &[f64], period: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    let mut rsi = RSI::new(period)?;
    let mut results = Vec::with_capacity(values.len());

    for &value in values {
        rsi.update(value);
        results.push(rsi.value());
    }

    Ok(results)
}
