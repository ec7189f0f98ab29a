//! Alpha Vantage FX data source (primary provider).
//!
//! Uses the CSV endpoints (FX_INTRADAY / FX_DAILY / FX_WEEKLY). Alpha Vantage
//! answers rate-limit and error conditions with a JSON envelope even when CSV
//! was requested, so a JSON-looking body is treated as a failure.

use crate::models::{Candle, CandleSeries, SeriesSource, Timeframe};
use crate::sources::{QuoteSource, SourceError};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::time::Duration;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

/// Payloads shorter than this many data rows are not a viable series.
const MIN_VIABLE_ROWS: usize = 5;

pub struct AlphaVantageSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageSource {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// FX pair split: "XAU/USD" -> ("XAU", "USD").
    fn fx_pair(symbol: &str) -> Result<(&str, &str), SourceError> {
        symbol
            .split_once('/')
            .ok_or_else(|| SourceError::UnsupportedSymbol(symbol.to_string()))
    }

    fn request_url(&self, symbol: &str, timeframe: Timeframe) -> Result<Url, SourceError> {
        let (from_symbol, to_symbol) = Self::fx_pair(symbol)?;

        let mut params = vec![
            ("from_symbol", from_symbol.to_string()),
            ("to_symbol", to_symbol.to_string()),
            ("apikey", self.api_key.clone()),
            ("datatype", "csv".to_string()),
            ("outputsize", "compact".to_string()),
        ];

        let function = match timeframe {
            Timeframe::M1 => "FX_INTRADAY",
            Timeframe::M5 => "FX_INTRADAY",
            Timeframe::M15 => "FX_INTRADAY",
            Timeframe::M30 => "FX_INTRADAY",
            Timeframe::H1 => "FX_INTRADAY",
            Timeframe::D1 => "FX_DAILY",
            Timeframe::W1 => "FX_WEEKLY",
            Timeframe::H4 => return Err(SourceError::UnsupportedTimeframe(timeframe)),
        };
        params.push(("function", function.to_string()));

        if function == "FX_INTRADAY" {
            let interval = match timeframe {
                Timeframe::M1 => "1min",
                Timeframe::M5 => "5min",
                Timeframe::M15 => "15min",
                Timeframe::M30 => "30min",
                _ => "60min",
            };
            params.push(("interval", interval.to_string()));
        }

        Url::parse_with_params(&format!("{}/query", self.base_url), &params)
            .map_err(|e| SourceError::MalformedPayload(e.to_string()))
    }

    /// Intraday rows carry "YYYY-MM-DD HH:MM:SS", daily rows "YYYY-MM-DD".
    fn parse_timestamp(raw: &str) -> Result<chrono::DateTime<Utc>, SourceError> {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Ok(Utc.from_utc_datetime(&dt));
        }
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| SourceError::MalformedPayload(format!("bad timestamp '{}': {}", raw, e)))?;
        let dt = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| SourceError::MalformedPayload(format!("bad timestamp '{}'", raw)))?;
        Ok(Utc.from_utc_datetime(&dt))
    }

    fn parse_csv(body: &str) -> Result<Vec<Candle>, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let mut candles = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| SourceError::MalformedPayload(e.to_string()))?;
            if record.len() < 5 {
                return Err(SourceError::MalformedPayload(format!(
                    "expected 5 columns, got {}",
                    record.len()
                )));
            }

            let timestamp = Self::parse_timestamp(&record[0])?;
            let parse = |i: usize| -> Result<f64, SourceError> {
                record[i]
                    .parse()
                    .map_err(|_| SourceError::MalformedPayload(format!("bad number '{}'", &record[i])))
            };

            // FX feeds carry no volume.
            candles.push(Candle::new(
                parse(1)?,
                parse(2)?,
                parse(3)?,
                parse(4)?,
                0.0,
                timestamp,
            ));
        }

        Ok(candles)
    }

    /// A JSON body where CSV was requested is Alpha Vantage's error envelope.
    fn classify_envelope(body: &str) -> SourceError {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            let note = value
                .get("Note")
                .or_else(|| value.get("Information"))
                .and_then(|v| v.as_str());
            if let Some(message) = note {
                let lowered = message.to_lowercase();
                if lowered.contains("call frequency") || lowered.contains("rate limit") {
                    return SourceError::RateLimited;
                }
                return SourceError::MalformedPayload(message.to_string());
            }
            if let Some(message) = value.get("Error Message").and_then(|v| v.as_str()) {
                return SourceError::MalformedPayload(message.to_string());
            }
        }
        SourceError::MalformedPayload("unexpected JSON envelope".to_string())
    }
}

#[async_trait]
impl QuoteSource for AlphaVantageSource {
    fn name(&self) -> &'static str {
        "alpha_vantage"
    }

    fn source(&self) -> SeriesSource {
        SeriesSource::AlphaVantage
    }

    async fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries, SourceError> {
        // A blank key means the adapter was registered without credentials.
        if self.api_key.trim().is_empty() {
            return Err(SourceError::MissingCredentials);
        }

        let url = self.request_url(symbol, timeframe)?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;

        let trimmed = body.trim_start();
        if trimmed.is_empty() {
            return Err(SourceError::EmptyPayload);
        }
        if trimmed.starts_with('{') {
            return Err(Self::classify_envelope(trimmed));
        }

        let candles = Self::parse_csv(&body)?;
        if candles.len() < MIN_VIABLE_ROWS {
            return Err(SourceError::TooFewRows {
                got: candles.len(),
                need: MIN_VIABLE_ROWS,
            });
        }

        // Rows arrive newest-first; normalize to ascending and keep the tail.
        let mut series = CandleSeries::new(symbol, timeframe, self.source(), candles);
        if series.len() > limit {
            let excess = series.len() - limit;
            series.candles.drain(..excess);
        }
        Ok(series)
    }
}
