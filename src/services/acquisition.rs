//! Acquisition orchestrator: a prioritized waterfall over quote sources.
//!
//! Quote feeds are flaky and rate-limited; a user-facing analysis must never
//! hard-fail because one vendor is down. Sources are tried strictly in
//! priority order and the first one returning a viable series wins. The
//! synthetic generator sits last, so total failure is unreachable by
//! construction.

use crate::config::Config;
use crate::metrics::Metrics;
use crate::models::{CandleSeries, Timeframe};
use crate::sources::{AlphaVantageSource, QuoteSource, SyntheticSource, YahooSource};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("all quote sources exhausted for {symbol} ({timeframe})")]
    Exhausted { symbol: String, timeframe: Timeframe },
}

pub struct MarketDataService {
    sources: Vec<Arc<dyn QuoteSource>>,
    min_rows: usize,
    timeout: Duration,
    metrics: Option<Arc<Metrics>>,
}

impl MarketDataService {
    /// Build the production waterfall from configuration. A missing Alpha
    /// Vantage key disables that adapter rather than failing startup.
    pub fn new(config: &Config) -> Self {
        let mut sources: Vec<Arc<dyn QuoteSource>> = Vec::new();

        match &config.alpha_vantage_key {
            Some(key) => {
                let source = match &config.alpha_vantage_url {
                    Some(url) => AlphaVantageSource::with_base_url(key, url),
                    None => AlphaVantageSource::new(key),
                };
                sources.push(Arc::new(source));
            }
            None => {
                info!("ALPHA_VANTAGE_KEY not set, primary quote source disabled");
            }
        }

        let yahoo = match &config.yahoo_url {
            Some(url) => YahooSource::with_base_url(url),
            None => YahooSource::new(),
        };
        sources.push(Arc::new(yahoo));
        sources.push(Arc::new(SyntheticSource::new()));

        Self {
            sources,
            min_rows: config.min_rows,
            timeout: config.source_timeout,
            metrics: None,
        }
    }

    /// Attach a metrics registry; synthetic fallbacks are counted on it.
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Custom waterfall, used by tests and embedders.
    pub fn with_sources(
        sources: Vec<Arc<dyn QuoteSource>>,
        min_rows: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            sources,
            min_rows,
            timeout,
            metrics: None,
        }
    }

    /// Fetch a candle series, falling through the source waterfall.
    ///
    /// Each adapter runs under a bounded timeout so a hung vendor cannot
    /// stall the pipeline. The returned series carries the tag of whichever
    /// source actually served it.
    pub async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries, AcquisitionError> {
        for source in &self.sources {
            let attempt = tokio::time::timeout(
                self.timeout,
                source.fetch(symbol, timeframe, limit),
            )
            .await;

            let series = match attempt {
                Err(_) => {
                    warn!(
                        source = source.name(),
                        symbol,
                        timeframe = %timeframe,
                        timeout_secs = self.timeout.as_secs(),
                        "quote source timed out, falling through"
                    );
                    continue;
                }
                Ok(Err(error)) => {
                    warn!(
                        source = source.name(),
                        symbol,
                        timeframe = %timeframe,
                        error = %error,
                        "quote source rejected, falling through"
                    );
                    continue;
                }
                Ok(Ok(series)) => series,
            };

            if series.len() < self.min_rows {
                warn!(
                    source = source.name(),
                    symbol,
                    rows = series.len(),
                    min_rows = self.min_rows,
                    "quote source returned too few rows, falling through"
                );
                continue;
            }

            if series.source.is_synthetic() {
                if let Some(metrics) = &self.metrics {
                    metrics.synthetic_series_total.inc();
                }
                warn!(
                    symbol,
                    timeframe = %timeframe,
                    rows = series.len(),
                    "all live quote sources failed, serving synthetic data"
                );
            } else {
                debug!(
                    source = source.name(),
                    symbol,
                    timeframe = %timeframe,
                    rows = series.len(),
                    "candles served"
                );
            }

            return Ok(series);
        }

        // Unreachable while the synthetic source is registered.
        Err(AcquisitionError::Exhausted {
            symbol: symbol.to_string(),
            timeframe,
        })
    }
}
