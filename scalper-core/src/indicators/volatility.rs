//! Return volatility

use crate::data::Candle;
use crate::indicators::{check_period, Indicator, IndicatorError, RollingStdDev};

/// Rolling sample standard deviation of close-to-close percentage returns,
/// evaluated at the last bar.
///
/// The first return is only available at the second bar, so `period + 1`
/// candles are needed. A zero previous close makes that return undefined and
/// restarts the window: the value stays unavailable until `period` finite
/// returns follow it.
pub fn volatility(candles: &[Candle], period: usize) -> Result<Option<f64>, IndicatorError> {
    check_period("Volatility", period)?;
    let mut deviation = RollingStdDev::new(period)?;

    let mut finite_run = 0usize;
    for pair in candles.windows(2) {
        let prev = pair[0].close;
        let ret = (pair[1].close - prev) / prev;
        if ret.is_finite() {
            deviation.update(ret);
            finite_run += 1;
        } else {
            deviation = RollingStdDev::new(period)?;
            finite_run = 0;
        }
    }

    if finite_run < period {
        return Ok(None);
    }
    Ok(deviation.value())
}
