//! Multi-timeframe synthesizer.
//!
//! Runs the acquisition-and-classification pipeline independently for a
//! short (1h), derived medium (4h) and long (1d) timeframe, then reduces the
//! three verdicts to a single cross-timeframe alignment label.

use crate::models::{CandleSeries, MultiTimeframeContext, StructureVerdict, Timeframe};
use crate::services::acquisition::{AcquisitionError, MarketDataService};
use crate::structure::{classify, StructureConfig};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

const SHORT_TIMEFRAME: Timeframe = Timeframe::H1;
const SHORT_LIMIT: usize = 200;
const LONG_TIMEFRAME: Timeframe = Timeframe::D1;
const LONG_LIMIT: usize = 50;
/// 1h bars per derived 4h bucket.
const MEDIUM_FACTOR: usize = 4;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
}

pub struct QuantEngine {
    market_data: Arc<MarketDataService>,
    config: StructureConfig,
}

impl QuantEngine {
    pub fn new(market_data: Arc<MarketDataService>) -> Self {
        Self {
            market_data,
            config: StructureConfig::default(),
        }
    }

    pub fn with_config(market_data: Arc<MarketDataService>, config: StructureConfig) -> Self {
        Self {
            market_data,
            config,
        }
    }

    /// Build the multi-timeframe context for one instrument.
    ///
    /// The short and long fetches run concurrently; total latency is bounded
    /// by the slower of the two. Dropping the returned future cancels any
    /// in-flight request; no partial context is ever surfaced.
    pub async fn synthesize(&self, symbol: &str) -> Result<MultiTimeframeContext, EngineError> {
        let (short_series, long_series) = tokio::join!(
            self.market_data
                .fetch_candles(symbol, SHORT_TIMEFRAME, SHORT_LIMIT),
            self.market_data
                .fetch_candles(symbol, LONG_TIMEFRAME, LONG_LIMIT),
        );
        let short_series = short_series?;
        let long_series = long_series?;

        // The medium timeframe is derived, never fetched: a thin short
        // series degrades it to insufficient_data instead of fabricating
        // bars from partial data.
        let medium_series = short_series.resample(MEDIUM_FACTOR, Timeframe::H4);

        let short = self.classify_leg(&short_series);
        let medium = self.classify_leg(&medium_series);
        let long = self.classify_leg(&long_series);

        let alignment = alignment_label(&short, &medium, &long);
        info!(
            symbol,
            alignment = %alignment,
            short_source = short_series.source.label(),
            long_source = long_series.source.label(),
            "multi-timeframe context built"
        );

        Ok(MultiTimeframeContext {
            symbol: symbol.to_string(),
            short,
            medium,
            long,
            alignment,
        })
    }

    fn classify_leg(&self, series: &CandleSeries) -> StructureVerdict {
        let verdict = classify(series, &self.config);
        debug!(
            symbol = %series.symbol,
            timeframe = %series.timeframe,
            bars = series.len(),
            status = ?verdict.status,
            trend = %verdict.trend,
            "timeframe classified"
        );
        verdict
    }
}

/// Reduce three verdicts to the cross-timeframe alignment label.
///
/// All three trends agree -> "Strong <Trend>"; the two longer timeframes
/// agree against the shortest -> "<Trend> (Higher Timeframe Dominance)";
/// any degraded verdict -> "Unavailable"; otherwise "Mixed".
pub fn alignment_label(
    short: &StructureVerdict,
    medium: &StructureVerdict,
    long: &StructureVerdict,
) -> String {
    if !short.is_ok() || !medium.is_ok() || !long.is_ok() {
        return "Unavailable".to_string();
    }

    if short.trend == medium.trend && medium.trend == long.trend {
        format!("Strong {}", long.trend)
    } else if medium.trend == long.trend {
        format!("{} (Higher Timeframe Dominance)", long.trend)
    } else {
        "Mixed".to_string()
    }
}
