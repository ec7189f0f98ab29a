//! Yahoo Finance chart API source (secondary provider).
//!
//! Used only for the flagship instrument (spot gold via the GC=F future).
//! The v8 chart response stores each OHLCV field as its own column array;
//! normalization zips them back into candles and skips null rows.

use crate::models::{Candle, CandleSeries, SeriesSource, Timeframe};
use crate::sources::{QuoteSource, SourceError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// The feed is treated as failed when it returns fewer rows than this.
const MIN_VIABLE_ROWS: usize = 10;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

pub struct YahooSource {
    client: reqwest::Client,
    base_url: String,
}

impl YahooSource {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Map the instrument onto a Yahoo ticker. Only the flagship pair is
    /// supported by this adapter.
    fn map_symbol(symbol: &str) -> Result<&'static str, SourceError> {
        match symbol {
            "XAU/USD" | "XAU-USD" => Ok("GC=F"),
            other => Err(SourceError::UnsupportedSymbol(other.to_string())),
        }
    }

    fn interval(timeframe: Timeframe) -> Result<&'static str, SourceError> {
        match timeframe {
            Timeframe::M1 => Ok("1m"),
            Timeframe::M5 => Ok("5m"),
            Timeframe::M15 => Ok("15m"),
            Timeframe::M30 => Ok("30m"),
            Timeframe::H1 => Ok("60m"),
            Timeframe::D1 => Ok("1d"),
            Timeframe::W1 => Ok("1wk"),
            Timeframe::H4 => Err(SourceError::UnsupportedTimeframe(timeframe)),
        }
    }

    fn chart_url(&self, ticker: &str, timeframe: Timeframe, limit: usize) -> Result<Url, SourceError> {
        let interval = Self::interval(timeframe)?;
        let now = Utc::now();
        // Double the nominal window so closed-market gaps still leave
        // enough rows.
        let span = timeframe.duration() * (limit.max(1) as i32) * 2;
        let period1 = (now - span).timestamp();
        let period2 = now.timestamp();

        Url::parse_with_params(
            &format!("{}/v8/finance/chart/{}", self.base_url, ticker),
            &[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", interval.to_string()),
            ],
        )
        .map_err(|e| SourceError::MalformedPayload(e.to_string()))
    }

    fn parse_response(response: ChartResponse) -> Result<Vec<Candle>, SourceError> {
        let result = response.chart.result.ok_or_else(|| {
            if let Some(err) = response.chart.error {
                SourceError::MalformedPayload(format!("{}: {}", err.code, err.description))
            } else {
                SourceError::EmptyPayload
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or(SourceError::EmptyPayload)?;

        let timestamps = data.timestamp.ok_or(SourceError::EmptyPayload)?;
        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::MalformedPayload("no quote data".to_string()))?;

        let mut candles = Vec::with_capacity(timestamps.len());
        for (i, ts) in timestamps.iter().enumerate() {
            let row = (
                quote.open.get(i).copied().flatten(),
                quote.high.get(i).copied().flatten(),
                quote.low.get(i).copied().flatten(),
                quote.close.get(i).copied().flatten(),
            );
            // Null rows (halted or not-yet-settled buckets) are skipped.
            if let (Some(open), Some(high), Some(low), Some(close)) = row {
                let volume = quote.volume.get(i).copied().flatten().unwrap_or(0) as f64;
                let timestamp: DateTime<Utc> = DateTime::from_timestamp(*ts, 0)
                    .ok_or_else(|| SourceError::MalformedPayload(format!("bad timestamp {}", ts)))?;
                candles.push(Candle::new(open, high, low, close, volume, timestamp));
            }
        }

        Ok(candles)
    }
}

impl Default for YahooSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteSource for YahooSource {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    fn source(&self) -> SeriesSource {
        SeriesSource::Yahoo
    }

    async fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries, SourceError> {
        let ticker = Self::map_symbol(symbol)?;
        let url = self.chart_url(ticker, timeframe, limit)?;

        let response = self.client.get(url).send().await?.error_for_status()?;
        let payload: ChartResponse = response.json().await?;

        let candles = Self::parse_response(payload)?;
        if candles.len() < MIN_VIABLE_ROWS {
            return Err(SourceError::TooFewRows {
                got: candles.len(),
                need: MIN_VIABLE_ROWS,
            });
        }

        let mut series = CandleSeries::new(symbol, timeframe, self.source(), candles);
        if series.len() > limit {
            let excess = series.len() - limit;
            series.candles.drain(..excess);
        }
        Ok(series)
    }
}
