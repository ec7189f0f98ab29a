//! Assembles the full indicator snapshot for a series.

use crate::indicators::momentum::calculate_macd_default;
use crate::indicators::momentum::calculate_rsi_default;
use crate::indicators::structure::calculate_pivots;
use crate::indicators::trend::calculate_ema;
use crate::indicators::volatility::{calculate_atr_default, calculate_bollinger_bands_default};
use crate::models::{CandleSeries, IndicatorSnapshot};

/// Compute every indicator the series supports, as of its final bar.
///
/// Pure transform: the series is never mutated, callers get a fresh snapshot
/// per invocation.
pub fn compute_snapshot(series: &CandleSeries) -> IndicatorSnapshot {
    let candles = &series.candles;

    IndicatorSnapshot {
        ema_20: calculate_ema(candles, 20),
        ema_50: calculate_ema(candles, 50),
        rsi: calculate_rsi_default(candles),
        atr: calculate_atr_default(candles),
        macd: calculate_macd_default(candles),
        bollinger: calculate_bollinger_bands_default(candles),
        pivots: calculate_pivots(candles),
    }
}
