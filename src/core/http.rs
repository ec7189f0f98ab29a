//! HTTP endpoint server using Axum
//!
//! Thin boundary over the engine: a charting feed and the multi-timeframe
//! context, plus health and metrics.

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::Config;
use crate::metrics::Metrics;
use crate::models::{MultiTimeframeContext, Timeframe};
use crate::services::{MarketDataService, QuantEngine};

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub market_data: Arc<MarketDataService>,
    pub engine: Arc<QuantEngine>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "aurix-quant-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct MarketDataQuery {
    timeframe: Option<String>,
}

/// Charting feed: candles for a symbol, serialized the way the frontend's
/// chart widget expects them. Unknown timeframes fall back to 1h.
async fn market_data(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<MarketDataQuery>,
) -> Result<Json<Value>, StatusCode> {
    let clean_symbol = symbol.replace('-', "/");
    let timeframe = params
        .timeframe
        .as_deref()
        .map(Timeframe::parse_or_default)
        .unwrap_or(Timeframe::H1);

    let series = state
        .market_data
        .fetch_candles(&clean_symbol, timeframe, 100)
        .await
        .map_err(|e| {
            error!(error = %e, symbol = %clean_symbol, "market data fetch failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let records: Vec<Value> = series
        .candles
        .iter()
        .map(|candle| {
            json!({
                "time": candle.timestamp.timestamp(),
                "open": candle.open,
                "high": candle.high,
                "low": candle.low,
                "close": candle.close,
            })
        })
        .collect();

    Ok(Json(json!(records)))
}

/// Multi-timeframe market-structure context for a symbol.
async fn context(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<MultiTimeframeContext>, StatusCode> {
    let clean_symbol = symbol.replace('-', "/");

    let context = state.engine.synthesize(&clean_symbol).await.map_err(|e| {
        error!(error = %e, symbol = %clean_symbol, "synthesis failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(context))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/market-data/{symbol}", get(market_data))
        .route("/api/context/{symbol}", get(context))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let start_time = Arc::new(Instant::now());

    let market_data = Arc::new(MarketDataService::new(config).with_metrics(metrics.clone()));
    let engine = Arc::new(QuantEngine::new(market_data.clone()));

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time,
        market_data,
        engine,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port)).await?;

    info!(port = config.http_port, "HTTP server listening on port {}", config.http_port);
    axum::serve(listener, app).await?;

    Ok(())
}
