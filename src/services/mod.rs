//! Engine services: acquisition waterfall and multi-timeframe synthesis.

pub mod acquisition;
pub mod synthesis;

pub use acquisition::{AcquisitionError, MarketDataService};
pub use synthesis::{EngineError, QuantEngine};
