//! Aurix quantitative market-structure engine.
//!
//! Acquires historical candles from a waterfall of unreliable quote sources,
//! computes closed-form technical indicators, classifies market structure per
//! timeframe, and synthesizes a cross-timeframe alignment verdict for the
//! downstream analysis layer.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod sources;
pub mod structure;
