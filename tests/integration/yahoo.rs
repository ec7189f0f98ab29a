//! Yahoo chart-API adapter against a mocked endpoint.

use aurix::models::{SeriesSource, Timeframe};
use aurix::sources::{QuoteSource, SourceError, YahooSource};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chart_body(rows: usize, null_at: Option<usize>) -> serde_json::Value {
    let base_ts = 1_704_067_200i64; // 2024-01-01 00:00:00 UTC
    let timestamps: Vec<i64> = (0..rows).map(|i| base_ts + i as i64 * 3600).collect();

    let column = |offset: f64| -> Vec<serde_json::Value> {
        (0..rows)
            .map(|i| {
                if Some(i) == null_at {
                    serde_json::Value::Null
                } else {
                    json!(2030.0 + i as f64 + offset)
                }
            })
            .collect()
    };

    json!({
        "chart": {
            "result": [{
                "timestamp": timestamps,
                "indicators": {
                    "quote": [{
                        "open": column(0.0),
                        "high": column(1.0),
                        "low": column(-1.0),
                        "close": column(0.5),
                        "volume": (0..rows).map(|_| json!(1000)).collect::<Vec<_>>(),
                    }]
                }
            }],
            "error": null
        }
    })
}

#[tokio::test]
async fn parses_chart_response_for_flagship_symbol() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GC=F"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(12, None)))
        .mount(&server)
        .await;

    let source = YahooSource::with_base_url(server.uri());
    let series = source.fetch("XAU/USD", Timeframe::H1, 100).await.unwrap();

    assert_eq!(series.source, SeriesSource::Yahoo);
    assert_eq!(series.len(), 12);
    assert_eq!(series.candles[0].volume, 1000.0);
}

#[tokio::test]
async fn null_rows_are_skipped_during_normalization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GC=F"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(13, Some(6))))
        .mount(&server)
        .await;

    let source = YahooSource::with_base_url(server.uri());
    let series = source.fetch("XAU/USD", Timeframe::H1, 100).await.unwrap();
    assert_eq!(series.len(), 12);
}

#[tokio::test]
async fn thin_chart_response_is_too_few_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GC=F"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(4, None)))
        .mount(&server)
        .await;

    let source = YahooSource::with_base_url(server.uri());
    let error = source.fetch("XAU/USD", Timeframe::H1, 100).await.unwrap_err();
    assert!(matches!(error, SourceError::TooFewRows { got: 4, need: 10 }));
}

#[tokio::test]
async fn error_envelope_is_a_malformed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v8/finance/chart/GC=F"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found" }
            }
        })))
        .mount(&server)
        .await;

    let source = YahooSource::with_base_url(server.uri());
    let error = source.fetch("XAU/USD", Timeframe::H1, 100).await.unwrap_err();
    assert!(matches!(error, SourceError::MalformedPayload(_)));
}

#[tokio::test]
async fn only_the_flagship_symbol_is_supported() {
    let source = YahooSource::with_base_url("http://127.0.0.1:9");
    let error = source.fetch("EUR/USD", Timeframe::H1, 100).await.unwrap_err();
    assert!(matches!(error, SourceError::UnsupportedSymbol(_)));
}
