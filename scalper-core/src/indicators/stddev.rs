//! Rolling sample standard deviation

use crate::indicators::{check_period, Indicator, IndicatorError};
use std::collections::VecDeque;

/// Rolling standard deviation with an `n - 1` denominator.
///
/// `ta::indicators::StandardDeviation` divides by `n`; the bands and the
/// return volatility here use the sample estimate instead. A window of one
/// value has no sample deviation and never becomes ready.
#[derive(Debug)]
pub struct RollingStdDev {
    period: usize,
    window: VecDeque<f64>,
    last_mean: Option<f64>,
    last_value: Option<f64>,
}

impl RollingStdDev {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        check_period("StdDev", period)?;
        Ok(Self {
            period,
            window: VecDeque::with_capacity(period + 1),
            last_mean: None,
            last_value: None,
        })
    }

    /// Mean of the current full window
    pub fn mean(&self) -> Option<f64> {
        self.last_mean
    }
}

impl Indicator for RollingStdDev {
    fn name(&self) -> &str {
        "StdDev"
    }

    fn update(&mut self, value: f64) {
        self.window.push_back(value);
        if self.window.len() > self.period {
            self.window.pop_front();
        }

        if self.window.len() < self.period || self.period < 2 {
            return;
        }

        let n = self.window.len() as f64;
        let mean = self.window.iter().sum::<f64>() / n;
        let variance = self
            .window
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / (n - 1.0);

        self.last_mean = Some(mean);
        self.last_value = Some(variance.sqrt());
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.last_value.is_some()
    }
}
