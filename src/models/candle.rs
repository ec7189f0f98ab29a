//! Candles, timeframes and the canonical candle series.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One OHLCV bar of price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }
}

/// Bar width of a candle series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "1d")]
    D1,
    #[serde(rename = "1w")]
    W1,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
            Timeframe::M15 => "15m",
            Timeframe::M30 => "30m",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "1d",
            Timeframe::W1 => "1w",
        }
    }

    /// Wall-clock width of one bar.
    pub fn duration(&self) -> Duration {
        match self {
            Timeframe::M1 => Duration::minutes(1),
            Timeframe::M5 => Duration::minutes(5),
            Timeframe::M15 => Duration::minutes(15),
            Timeframe::M30 => Duration::minutes(30),
            Timeframe::H1 => Duration::hours(1),
            Timeframe::H4 => Duration::hours(4),
            Timeframe::D1 => Duration::days(1),
            Timeframe::W1 => Duration::weeks(1),
        }
    }

    /// Parse a query-string timeframe, falling back to 1h for unknown values.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or(Timeframe::H1)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Timeframe::M1),
            "5m" => Ok(Timeframe::M5),
            "15m" => Ok(Timeframe::M15),
            "30m" => Ok(Timeframe::M30),
            "1h" => Ok(Timeframe::H1),
            "4h" => Ok(Timeframe::H4),
            "1d" => Ok(Timeframe::D1),
            "1w" => Ok(Timeframe::W1),
            other => Err(format!("unknown timeframe: {}", other)),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which quote source actually produced a series.
///
/// The synthetic generator is a correctness safety valve, not a data source;
/// every series is tagged so callers can tell fabricated data from live data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesSource {
    #[serde(rename = "alpha_vantage")]
    AlphaVantage,
    #[serde(rename = "yahoo")]
    Yahoo,
    #[serde(rename = "generate_mock")]
    Synthetic,
}

impl SeriesSource {
    pub fn label(&self) -> &'static str {
        match self {
            SeriesSource::AlphaVantage => "alpha_vantage",
            SeriesSource::Yahoo => "yahoo",
            SeriesSource::Synthetic => "generate_mock",
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, SeriesSource::Synthetic)
    }
}

/// An ordered candle series for one (symbol, timeframe) pair.
///
/// Immutable after construction; indicators are computed into a separate
/// snapshot rather than appended in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleSeries {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub source: SeriesSource,
    pub candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        source: SeriesSource,
        mut candles: Vec<Candle>,
    ) -> Self {
        candles.sort_by_key(|c| c.timestamp);
        // Later rows win on duplicate timestamps; the stable sort keeps
        // equal stamps in payload order, so the removed element is swapped
        // into the surviving slot.
        candles.dedup_by(|later, kept| {
            if later.timestamp == kept.timestamp {
                std::mem::swap(later, kept);
                true
            } else {
                false
            }
        });
        Self {
            symbol: symbol.into(),
            timeframe,
            source,
            candles,
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Resample into fixed-width buckets of `factor` bars.
    ///
    /// open = first, high = max, low = min, close = last, volume = sum;
    /// an incomplete trailing bucket is dropped rather than fabricated.
    pub fn resample(&self, factor: usize, timeframe: Timeframe) -> CandleSeries {
        let mut candles = Vec::with_capacity(self.candles.len() / factor.max(1));
        if factor > 0 {
            for bucket in self.candles.chunks_exact(factor) {
                let high = bucket.iter().map(|c| c.high).fold(f64::MIN, f64::max);
                let low = bucket.iter().map(|c| c.low).fold(f64::MAX, f64::min);
                let volume = bucket.iter().map(|c| c.volume).sum();
                candles.push(Candle::new(
                    bucket[0].open,
                    high,
                    low,
                    bucket[bucket.len() - 1].close,
                    volume,
                    bucket[0].timestamp,
                ));
            }
        }
        CandleSeries {
            symbol: self.symbol.clone(),
            timeframe,
            source: self.source,
            candles,
        }
    }
}
