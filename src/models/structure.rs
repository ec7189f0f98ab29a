//! Classifier verdicts and the multi-timeframe context.

use crate::models::indicators::IndicatorSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bullish => f.write_str("Bullish"),
            Trend::Bearish => f.write_str("Bearish"),
            Trend::Neutral => f.write_str("Neutral"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Momentum {
    Overbought,
    Oversold,
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictStatus {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "insufficient_data")]
    InsufficientData,
}

/// Deterministic, risk-framed entry/stop/target triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedLevels {
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
}

/// The classifier's output for one timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureVerdict {
    pub status: VerdictStatus,
    pub trend: Trend,
    pub momentum: Momentum,
    pub volatility_alert: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<SuggestedLevels>,
    /// Raw snapshot carried for transparency toward the analysis layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators: Option<IndicatorSnapshot>,
}

impl StructureVerdict {
    /// Degraded verdict for a series too short to classify. A valid, if
    /// weak, answer rather than an error.
    pub fn insufficient_data() -> Self {
        Self {
            status: VerdictStatus::InsufficientData,
            trend: Trend::Neutral,
            momentum: Momentum::Neutral,
            volatility_alert: false,
            current_price: None,
            levels: None,
            indicators: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == VerdictStatus::Ok
    }
}

/// Three independent verdicts plus the cross-timeframe alignment label.
///
/// Built fresh per request, never cached by the engine. Serializes with the
/// timeframe-keyed shape the analysis layer embeds into its prompt context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTimeframeContext {
    pub symbol: String,
    #[serde(rename = "1h")]
    pub short: StructureVerdict,
    #[serde(rename = "4h")]
    pub medium: StructureVerdict,
    #[serde(rename = "1d")]
    pub long: StructureVerdict,
    pub alignment: String,
}
