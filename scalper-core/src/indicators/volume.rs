//! Volume based indicators: VWAP and volume ratio

use crate::data::Candle;
use crate::indicators::{check_period, Indicator, IndicatorError, SMA};

/// Volume-weighted average close over the whole window.
///
/// `None` for an empty window or one without any traded volume.
pub fn vwap(candles: &[Candle]) -> Option<f64> {
    let (value, volume) = candles
        .iter()
        .fold((0.0, 0.0), |(pv, v), c| (pv + c.quote_value(), v + c.volume));

    if volume > 0.0 {
        Some(value / volume)
    } else {
        None
    }
}

/// Last bar volume over the rolling mean volume of the last `period` bars
/// (the last bar included).
pub fn volume_ratio(candles: &[Candle], period: usize) -> Result<Option<f64>, IndicatorError> {
    check_period("VolumeRatio", period)?;
    let mut mean = SMA::new(period)?;
    for candle in candles {
        mean.update(candle.volume);
    }

    let ratio = match (candles.last(), mean.value()) {
        (Some(last), Some(avg)) if avg > 0.0 => Some(last.volume / avg),
        _ => None,
    };
    Ok(ratio)
}
