//! End-to-end synthesis over stubbed market data.

use crate::test_utils::{FailingSource, FixedSource, TrendingSource};
use aurix::models::SeriesSource;
use aurix::services::{MarketDataService, QuantEngine};
use aurix::sources::QuoteSource;
use std::sync::Arc;
use std::time::Duration;

fn service(sources: Vec<Arc<dyn QuoteSource>>) -> Arc<MarketDataService> {
    Arc::new(MarketDataService::with_sources(
        sources,
        5,
        Duration::from_millis(500),
    ))
}

#[tokio::test]
async fn uniform_uptrend_aligns_as_strong_bullish() {
    let engine = QuantEngine::new(service(vec![Arc::new(TrendingSource)]));

    let context = engine.synthesize("XAU/USD").await.unwrap();

    assert_eq!(context.alignment, "Strong Bullish");
    assert!(context.short.is_ok());
    assert!(context.medium.is_ok());
    assert!(context.long.is_ok());
    assert_eq!(context.short.trend.to_string(), "Bullish");
}

#[tokio::test]
async fn context_serializes_with_timeframe_keys() {
    let engine = QuantEngine::new(service(vec![Arc::new(TrendingSource)]));

    let context = engine.synthesize("XAU/USD").await.unwrap();
    let value = serde_json::to_value(&context).unwrap();

    let object = value.as_object().unwrap();
    assert!(object.contains_key("1h"));
    assert!(object.contains_key("4h"));
    assert!(object.contains_key("1d"));
    assert_eq!(object["alignment"], "Strong Bullish");
    assert_eq!(object["symbol"], "XAU/USD");
}

#[tokio::test]
async fn thin_series_degrades_alignment_to_unavailable() {
    // 12 rows clear the viability floor but not the classifier's minimum.
    let engine = QuantEngine::new(service(vec![Arc::new(FixedSource::new(
        SeriesSource::Yahoo,
        12,
    ))]));

    let context = engine.synthesize("XAU/USD").await.unwrap();

    assert_eq!(context.alignment, "Unavailable");
    assert!(!context.short.is_ok());
}

#[tokio::test]
async fn total_acquisition_failure_is_an_engine_error() {
    let engine = QuantEngine::new(service(vec![Arc::new(FailingSource)]));

    let result = engine.synthesize("XAU/USD").await;
    assert!(result.is_err());
}
