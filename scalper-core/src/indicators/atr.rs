//! ATR (Average True Range) indicator

use crate::data::Candle;
use crate::indicators::{check_period, Indicator, IndicatorError, SMA};
use ta::indicators::TrueRange;
use ta::Next;

/// Simple rolling mean of the true range.
///
/// `ta::indicators::AverageTrueRange` smooths with an EMA; this one keeps a
/// plain `period`-bar mean. The first bar's true range is its high-low range.
#[derive(Debug)]
pub struct AverageTrueRange {
    true_range: TrueRange,
    mean: SMA,
}

impl AverageTrueRange {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        check_period("ATR", period)?;
        Ok(Self {
            true_range: TrueRange::new(),
            mean: SMA::new(period)?,
        })
    }

    /// Feed one bar
    pub fn update_candle(&mut self, candle: &Candle) {
        let tr = self.true_range.next(candle);
        self.mean.update(tr);
    }

    pub fn value(&self) -> Option<f64> {
        self.mean.value()
    }
}

/// ATR at the last bar of the window
pub fn calculate_atr(candles: &[Candle], period: usize) -> Result<Option<f64>, IndicatorError> {
    let mut atr = AverageTrueRange::new(period)?;
    for candle in candles {
        atr.update_candle(candle);
    }
    Ok(atr.value())
}
