//! Unit tests for candle series and timeframes

use aurix::models::{Candle, CandleSeries, SeriesSource, Timeframe};
use chrono::{Duration, TimeZone, Utc};

fn hourly_candles(closes: &[f64]) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Candle::new(
                close,
                close + 1.0,
                close - 1.0,
                close,
                100.0,
                start + Duration::hours(i as i64),
            )
        })
        .collect()
}

#[test]
fn test_timeframe_round_trip() {
    for tf in ["1m", "5m", "15m", "30m", "1h", "4h", "1d", "1w"] {
        let parsed: Timeframe = tf.parse().unwrap();
        assert_eq!(parsed.as_str(), tf);
    }
}

#[test]
fn test_timeframe_fallback_for_unknown_values() {
    assert_eq!(Timeframe::parse_or_default("2h"), Timeframe::H1);
    assert_eq!(Timeframe::parse_or_default(""), Timeframe::H1);
    assert_eq!(Timeframe::parse_or_default("4h"), Timeframe::H4);
}

#[test]
fn test_series_sorts_and_deduplicates_timestamps() {
    let mut candles = hourly_candles(&[1.0, 2.0, 3.0]);
    candles.reverse();
    // Corrected duplicate of the middle timestamp, arriving later
    let mut revision = candles[1].clone();
    revision.close = 99.0;
    let revised_ts = revision.timestamp;
    candles.push(revision);

    let series = CandleSeries::new("XAU/USD", Timeframe::H1, SeriesSource::Yahoo, candles);
    assert_eq!(series.len(), 3);
    let timestamps: Vec<_> = series.candles.iter().map(|c| c.timestamp).collect();
    let mut sorted = timestamps.clone();
    sorted.sort();
    assert_eq!(timestamps, sorted);

    // The later payload row wins the duplicate slot
    let kept = series
        .candles
        .iter()
        .find(|c| c.timestamp == revised_ts)
        .unwrap();
    assert_eq!(kept.close, 99.0);
}

#[test]
fn test_resample_aggregates_buckets() {
    let closes: Vec<f64> = (1..=9).map(|i| i as f64).collect();
    let series = CandleSeries::new(
        "XAU/USD",
        Timeframe::H1,
        SeriesSource::Yahoo,
        hourly_candles(&closes),
    );

    let medium = series.resample(4, Timeframe::H4);
    // 9 bars -> 2 complete buckets, trailing bar dropped
    assert_eq!(medium.len(), 2);
    assert_eq!(medium.timeframe, Timeframe::H4);
    assert_eq!(medium.source, SeriesSource::Yahoo);

    let first = &medium.candles[0];
    assert_eq!(first.open, 1.0);
    assert_eq!(first.close, 4.0);
    assert_eq!(first.high, 5.0); // max of highs 2..5
    assert_eq!(first.low, 0.0); // min of lows 0..3
    assert_eq!(first.volume, 400.0);
}

#[test]
fn test_source_labels() {
    assert_eq!(SeriesSource::AlphaVantage.label(), "alpha_vantage");
    assert_eq!(SeriesSource::Yahoo.label(), "yahoo");
    assert_eq!(SeriesSource::Synthetic.label(), "generate_mock");
    assert!(SeriesSource::Synthetic.is_synthetic());
    assert!(!SeriesSource::Yahoo.is_synthetic());
}
