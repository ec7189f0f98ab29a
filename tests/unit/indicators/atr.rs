//! Unit tests for ATR indicator

use aurix::indicators::volatility::atr::{atr_series, calculate_atr_default};
use aurix::models::Candle;
use chrono::{Duration, TimeZone, Utc};

fn ranged_candles(count: usize, close: f64, range: f64) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            Candle::new(
                close,
                close + range / 2.0,
                close - range / 2.0,
                close,
                1000.0,
                start + Duration::hours(i as i64),
            )
        })
        .collect()
}

#[test]
fn test_atr_insufficient_data() {
    let candles = ranged_candles(14, 100.0, 2.0);
    assert!(calculate_atr_default(&candles).is_none());
}

#[test]
fn test_atr_constant_range() {
    let candles = ranged_candles(40, 100.0, 2.0);
    let atr = calculate_atr_default(&candles).unwrap();
    assert!((atr.value - 2.0).abs() < 1e-9);
    assert!((atr.series_mean - 2.0).abs() < 1e-9);
    assert_eq!(atr.period, 14);
}

#[test]
fn test_atr_series_length() {
    let candles = ranged_candles(40, 100.0, 2.0);
    let series = atr_series(&candles, 14);
    // 39 true ranges -> 26 complete rolling windows
    assert_eq!(series.len(), 26);
}

#[test]
fn test_atr_rises_on_volatility_spike() {
    let mut candles = ranged_candles(60, 100.0, 2.0);
    let mut spike = ranged_candles(15, 100.0, 30.0);
    let last_ts = candles.last().unwrap().timestamp;
    for (i, candle) in spike.iter_mut().enumerate() {
        candle.timestamp = last_ts + Duration::hours((i + 1) as i64);
    }
    candles.extend(spike);

    let atr = calculate_atr_default(&candles).unwrap();
    assert!((atr.value - 30.0).abs() < 1e-9);
    assert!(atr.value > atr.series_mean * 1.5);
}
