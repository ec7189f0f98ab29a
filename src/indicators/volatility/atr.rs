//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::{AtrIndicator, Candle};

/// Rolling ATR column: SMA of true range over `period`, one value per window
/// the series supports.
pub fn atr_series(candles: &[Candle], period: u32) -> Vec<f64> {
    let window = period as usize;
    if window == 0 || candles.len() < window + 1 {
        return Vec::new();
    }

    let mut tr_values = Vec::with_capacity(candles.len() - 1);
    for i in 1..candles.len() {
        tr_values.push(math::true_range(
            candles[i].high,
            candles[i].low,
            candles[i - 1].close,
        ));
    }

    tr_values
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / period as f64)
        .collect()
}

/// Calculate ATR (Average True Range)
///
/// Reports both the current value and the mean over every rolling window,
/// which the classifier's volatility alert compares against.
pub fn calculate_atr(candles: &[Candle], period: u32) -> Option<AtrIndicator> {
    let series = atr_series(candles, period);
    let value = *series.last()?;
    let series_mean = math::mean(&series)?;

    Some(AtrIndicator {
        value,
        series_mean,
        period,
    })
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(candles: &[Candle]) -> Option<AtrIndicator> {
    calculate_atr(candles, 14)
}
