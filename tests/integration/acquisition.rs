//! Waterfall behavior of the acquisition orchestrator.

use std::sync::Arc;
use std::time::Duration;

use aurix::models::{SeriesSource, Timeframe};
use aurix::services::MarketDataService;
use aurix::sources::{QuoteSource, SyntheticSource};

use tokio_test::assert_ok;

use crate::test_utils::{FailingSource, FixedSource, SlowSource};

fn service(sources: Vec<Arc<dyn QuoteSource>>) -> MarketDataService {
    MarketDataService::with_sources(sources, 5, Duration::from_millis(200))
}

#[tokio::test]
async fn secondary_serves_when_primary_fails() {
    let service = service(vec![
        Arc::new(FailingSource),
        Arc::new(FixedSource::new(SeriesSource::Yahoo, 12)),
        Arc::new(SyntheticSource::with_seed(1)),
    ]);

    let series =
        tokio_test::assert_ok!(service.fetch_candles("XAU/USD", Timeframe::H1, 100).await);

    assert_eq!(series.source, SeriesSource::Yahoo);
    assert_eq!(series.len(), 12);
}

#[tokio::test]
async fn synthetic_fallback_when_all_live_sources_fail() {
    let service = service(vec![
        Arc::new(FailingSource),
        Arc::new(FailingSource),
        Arc::new(SyntheticSource::with_seed(2)),
    ]);

    let series =
        tokio_test::assert_ok!(service.fetch_candles("XAU/USD", Timeframe::H1, 37).await);

    assert_eq!(series.source, SeriesSource::Synthetic);
    assert_eq!(series.source.label(), "generate_mock");
    assert_eq!(series.len(), 37);
}

#[tokio::test]
async fn first_viable_source_wins_in_priority_order() {
    let service = service(vec![
        Arc::new(FixedSource::new(SeriesSource::AlphaVantage, 30)),
        Arc::new(FixedSource::new(SeriesSource::Yahoo, 30)),
        Arc::new(SyntheticSource::with_seed(3)),
    ]);

    let series = service
        .fetch_candles("XAU/USD", Timeframe::H1, 100)
        .await
        .unwrap();

    assert_eq!(series.source, SeriesSource::AlphaVantage);
}

#[tokio::test]
async fn thin_series_falls_through_to_next_source() {
    let service = service(vec![
        Arc::new(FixedSource::new(SeriesSource::AlphaVantage, 3)),
        Arc::new(FixedSource::new(SeriesSource::Yahoo, 12)),
        Arc::new(SyntheticSource::with_seed(4)),
    ]);

    let series = service
        .fetch_candles("XAU/USD", Timeframe::H1, 100)
        .await
        .unwrap();

    assert_eq!(series.source, SeriesSource::Yahoo);
    assert_eq!(series.len(), 12);
}

#[tokio::test]
async fn hung_source_is_timed_out_and_skipped() {
    let service = service(vec![
        Arc::new(SlowSource { delay_ms: 2_000 }),
        Arc::new(FixedSource::new(SeriesSource::Yahoo, 20)),
        Arc::new(SyntheticSource::with_seed(5)),
    ]);

    let start = std::time::Instant::now();
    let series = service
        .fetch_candles("XAU/USD", Timeframe::H1, 100)
        .await
        .unwrap();

    assert_eq!(series.source, SeriesSource::Yahoo);
    assert!(start.elapsed() < Duration::from_secs(1));
}
