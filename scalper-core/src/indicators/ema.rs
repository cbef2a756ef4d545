//! EMA (Exponential Moving Average) indicator

use crate::indicators::{check_period, Indicator, IndicatorError};
use ta::indicators::ExponentialMovingAverage;
use ta::Next;

/// EMA indicator wrapper.
///
/// Smoothing factor is `2 / (period + 1)` and the average is seeded with the
/// first value, so it is defined from the first update on. With fewer than
/// `period` values the average is under-warmed but still reported.
#[derive(Debug)]
pub struct EMA {
    inner: ExponentialMovingAverage,
    period: usize,
    last_value: Option<f64>,
}

impl EMA {
    /// Create new EMA indicator
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        check_period("EMA", period)?;
        let inner = ExponentialMovingAverage::new(period)
            .map_err(|_| IndicatorError::InvalidPeriod { indicator: "EMA" })?;
        Ok(Self {
            inner,
            period,
            last_value: None,
        })
    }

    /// Get EMA period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for EMA {
    fn name(&self) -> &str {
        "EMA"
    }

    fn update(&mut self, value: f64) {
        self.last_value = Some(self.inner.next(value));
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.last_value.is_some()
    }
}

/// Calculate EMA from a series of values
pub fn calculate_ema(values: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    let mut ema = EMA::new(period)?;
    let mut results = Vec::with_capacity(values.len());

    for &value in values {
        ema.update(value);
        if let Some(v) = ema.value() {
            results.push(v);
        }
    }

    Ok(results)
}
