//! Classic pivot point support/resistance levels

use crate::models::{Candle, PivotPoints};

/// Calculate classic pivot levels from the final bar's own high/low/close.
///
/// pivot = (H + L + C) / 3
/// R1 = 2*pivot - L, S1 = 2*pivot - H
/// R2 = pivot + (H - L), S2 = pivot - (H - L)
pub fn calculate_pivots(candles: &[Candle]) -> Option<PivotPoints> {
    let bar = candles.last()?;
    let pivot = (bar.high + bar.low + bar.close) / 3.0;
    let range = bar.high - bar.low;

    Some(PivotPoints {
        pivot,
        r1: 2.0 * pivot - bar.low,
        s1: 2.0 * pivot - bar.high,
        r2: pivot + range,
        s2: pivot - range,
    })
}
