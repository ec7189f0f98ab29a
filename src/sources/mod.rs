//! Quote source adapters: one trait, multiple fallible implementations.
//!
//! An adapter talks to exactly one external quote source and normalizes its
//! schema into canonical candles. Ordinary failure modes (network errors,
//! rate limits, empty or malformed payloads) are reported as typed
//! `SourceError`s, never panics; the acquisition waterfall decides what to do
//! with them.

pub mod alpha_vantage;
pub mod synthetic;
pub mod yahoo;

pub use alpha_vantage::AlphaVantageSource;
pub use synthetic::SyntheticSource;
pub use yahoo::YahooSource;

use crate::models::{CandleSeries, SeriesSource, Timeframe};
use async_trait::async_trait;
use thiserror::Error;

/// Adapter-local failure. Always recovered by the orchestrator via fallback;
/// never surfaced to the engine's caller.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("missing API credentials")]
    MissingCredentials,

    #[error("unsupported timeframe: {0}")]
    UnsupportedTimeframe(Timeframe),

    #[error("unsupported symbol: {0}")]
    UnsupportedSymbol(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("empty payload")]
    EmptyPayload,

    #[error("too few rows: got {got}, need {need}")]
    TooFewRows { got: usize, need: usize },
}

/// One external quote source.
///
/// Implementations are stateless aside from a long-lived HTTP client that is
/// shared read-only across concurrent invocations.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Tag attached to series this adapter produces.
    fn source(&self) -> SeriesSource;

    /// Fetch up to `limit` candles for `(symbol, timeframe)`.
    async fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries, SourceError>;
}
