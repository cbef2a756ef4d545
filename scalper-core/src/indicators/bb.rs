//! Bollinger Bands indicator

use crate::indicators::{check_period, Indicator, IndicatorError, RollingStdDev};

/// Bollinger Bands: rolling mean ± `std_dev` rolling sample deviations
#[derive(Debug)]
pub struct BollingerBands {
    deviation: RollingStdDev,
    std_dev: f64,
    last_output: Option<BBResult>,
}

impl BollingerBands {
    /// Create new Bollinger Bands indicator
    pub fn new(period: usize, std_dev: f64) -> Result<Self, IndicatorError> {
        check_period("BollingerBands", period)?;
        Ok(Self {
            deviation: RollingStdDev::new(period)?,
            std_dev,
            last_output: None,
        })
    }

    /// Latest bands
    pub fn bands(&self) -> Option<BBResult> {
        self.last_output
    }

    /// Get middle band (SMA)
    pub fn middle(&self) -> Option<f64> {
        self.last_output.map(|o| o.middle)
    }
}

impl Indicator for BollingerBands {
    fn name(&self) -> &str {
        "BollingerBands"
    }

    fn update(&mut self, value: f64) {
        self.deviation.update(value);
        if let (Some(middle), Some(sd)) = (self.deviation.mean(), self.deviation.value()) {
            self.last_output = Some(BBResult {
                upper: middle + self.std_dev * sd,
                middle,
                lower: middle - self.std_dev * sd,
            });
        }
    }

    fn value(&self) -> Option<f64> {
        self.middle()
    }

    fn is_ready(&self) -> bool {
        self.last_output.is_some()
    }
}

/// Bollinger Bands result structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBResult {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands from a series of values
pub fn calculate_bollinger(
    values: &[f64],
    period: usize,
    std_dev: f64,
) -> Result<Vec<Option<BBResult>>, IndicatorError> {
    let mut bb = BollingerBands::new(period, std_dev)?;
    let mut results = Vec::with_capacity(values.len());

    for &value in values {
        bb.update(value);
        results.push(bb.bands());
    }

    Ok(results)
}
