//! Shared data models spanning the engine layers.

pub mod candle;
pub mod indicators;
pub mod structure;

pub use candle::{Candle, CandleSeries, SeriesSource, Timeframe};
pub use indicators::{
    AtrIndicator, BollingerBandsIndicator, EmaIndicator, IndicatorSnapshot, MacdIndicator,
    PivotPoints, RsiIndicator,
};
pub use structure::{
    Momentum, MultiTimeframeContext, StructureVerdict, SuggestedLevels, Trend, VerdictStatus,
};
