//! Synthetic random-walk generator: the waterfall's never-failing last resort.
//!
//! Exists so downstream logic always has something to operate on when every
//! live source is down. Series it produces are tagged `generate_mock` and the
//! orchestrator logs them distinctly from genuine market data.

use crate::models::{Candle, CandleSeries, SeriesSource, Timeframe};
use crate::sources::{QuoteSource, SourceError};
use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

const BASE_PRICE: f64 = 2030.0;
const STEP_SIGMA: f64 = 2.0;

pub struct SyntheticSource {
    rng: Mutex<StdRng>,
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seeded variant for reproducible series in tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Standard-normal draw via Box-Muller.
    fn gaussian(rng: &mut StdRng) -> f64 {
        let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
        let u2: f64 = rng.gen();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }

    fn generate(&self, symbol: &str, timeframe: Timeframe, limit: usize) -> CandleSeries {
        let now = Utc::now();
        let step = timeframe.duration();
        let mut price = BASE_PRICE;
        let mut candles = Vec::with_capacity(limit);

        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for i in 0..limit {
            price += Self::gaussian(&mut rng) * STEP_SIGMA;
            let timestamp = now - step * ((limit - i) as i32);
            candles.push(Candle::new(
                price,
                price + 1.0,
                price - 1.0,
                price,
                100.0,
                timestamp,
            ));
        }

        CandleSeries::new(symbol, timeframe, SeriesSource::Synthetic, candles)
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "generate_mock"
    }

    fn source(&self) -> SeriesSource {
        SeriesSource::Synthetic
    }

    async fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries, SourceError> {
        Ok(self.generate(symbol, timeframe, limit))
    }
}
