//! Unit tests for Bollinger Bands indicator

use aurix::indicators::volatility::{calculate_bollinger_bands, calculate_bollinger_bands_default};
use aurix::models::Candle;
use chrono::{Duration, TimeZone, Utc};

fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Candle::new(
                close,
                close + 0.5,
                close - 0.5,
                close,
                1000.0,
                start + Duration::hours(i as i64),
            )
        })
        .collect()
}

#[test]
fn test_bollinger_insufficient_data() {
    let candles = candles_from_closes(&vec![100.0; 19]);
    assert!(calculate_bollinger_bands_default(&candles).is_none());
}

#[test]
fn test_bollinger_band_ordering() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.9).sin() * 3.0).collect();
    let bands = calculate_bollinger_bands_default(&candles_from_closes(&closes)).unwrap();
    assert!(bands.upper > bands.middle);
    assert!(bands.middle > bands.lower);
}

#[test]
fn test_bollinger_collapses_on_constant_series() {
    let bands = calculate_bollinger_bands(&candles_from_closes(&vec![100.0; 30]), 20, 2.0).unwrap();
    assert_eq!(bands.upper, bands.middle);
    assert_eq!(bands.lower, bands.middle);
    assert_eq!(bands.middle, 100.0);
}
