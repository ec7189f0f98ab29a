//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::{Candle, MacdIndicator};

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of the MACD line
/// Histogram = MACD - Signal
pub fn calculate_macd(
    candles: &[Candle],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Option<MacdIndicator> {
    if candles.len() < (slow_period + signal_period) as usize {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let fast = math::ema_series(&closes, fast_period as usize);
    let slow = math::ema_series(&closes, slow_period as usize);
    let macd_values: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();

    let macd = *macd_values.last()?;
    let signal = math::ema(&macd_values, signal_period as usize)?;
    let histogram = macd - signal;

    Some(MacdIndicator {
        macd,
        signal,
        histogram,
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(candles: &[Candle]) -> Option<MacdIndicator> {
    calculate_macd(candles, 12, 26, 9)
}
