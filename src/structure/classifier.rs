//! Structure classifier: indicator snapshot -> trend, momentum, volatility
//! and a suggested entry/stop/target triple.

use crate::indicators::compute_snapshot;
use crate::models::{
    CandleSeries, IndicatorSnapshot, Momentum, StructureVerdict, SuggestedLevels, Trend,
    VerdictStatus,
};
use serde::{Deserialize, Serialize};

/// Classifier thresholds, lifted out of the decision rules so boundary
/// behavior can be probed precisely. All comparisons are strict: RSI of
/// exactly `rsi_overbought` resolves to the weaker side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureConfig {
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub rsi_bullish: f64,
    pub rsi_bearish: f64,
    /// Alert when current ATR exceeds this multiple of the series-mean ATR.
    pub volatility_ratio: f64,
    /// Floor for target distance as a multiple of risk.
    pub min_reward_risk: f64,
    /// Series shorter than this cannot be classified at all.
    pub min_bars: usize,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            rsi_bullish: 55.0,
            rsi_bearish: 45.0,
            volatility_ratio: 1.5,
            min_reward_risk: 2.0,
            min_bars: 20,
        }
    }
}

fn classify_trend(snapshot: &IndicatorSnapshot) -> Trend {
    match (&snapshot.ema_20, &snapshot.ema_50) {
        (Some(fast), Some(slow)) if fast.value > slow.value => Trend::Bullish,
        (Some(fast), Some(slow)) if fast.value < slow.value => Trend::Bearish,
        _ => Trend::Neutral,
    }
}

fn classify_momentum(snapshot: &IndicatorSnapshot, config: &StructureConfig) -> Momentum {
    // RSI undefined on thin history reads as neutral 50.
    let rsi = snapshot.rsi.as_ref().map(|r| r.value).unwrap_or(50.0);

    if rsi > config.rsi_overbought {
        Momentum::Overbought
    } else if rsi < config.rsi_oversold {
        Momentum::Oversold
    } else if rsi > config.rsi_bullish {
        Momentum::Bullish
    } else if rsi < config.rsi_bearish {
        Momentum::Bearish
    } else {
        Momentum::Neutral
    }
}

fn volatility_alert(snapshot: &IndicatorSnapshot, config: &StructureConfig) -> bool {
    snapshot
        .atr
        .as_ref()
        .map(|atr| atr.value > atr.series_mean * config.volatility_ratio)
        .unwrap_or(false)
}

/// Derive the entry/stop/target triple for a directional trend.
///
/// The stop sits at the nearer of the classic pivot level or EMA50 +/- ATR on
/// the side that invalidates the trend; the target is the opposing pivot when
/// it lies beyond entry in the trend direction, otherwise a minimum
/// reward-to-risk extension from entry.
fn suggest_levels(
    trend: Trend,
    entry: f64,
    snapshot: &IndicatorSnapshot,
    config: &StructureConfig,
) -> Option<SuggestedLevels> {
    let pivots = snapshot.pivots.as_ref()?;
    let ema_50 = snapshot.ema_50.as_ref()?.value;
    let atr = snapshot.atr.as_ref()?.value;

    match trend {
        Trend::Bullish => {
            let stop = pivots.s1.max(ema_50 - atr);
            let risk = entry - stop;
            if risk <= 0.0 {
                return None;
            }
            let target = if pivots.r1 > entry {
                pivots.r1
            } else {
                entry + risk * config.min_reward_risk
            };
            Some(SuggestedLevels {
                entry,
                stop,
                target,
            })
        }
        Trend::Bearish => {
            let stop = pivots.r1.min(ema_50 + atr);
            let risk = stop - entry;
            if risk <= 0.0 {
                return None;
            }
            let target = if pivots.s1 < entry {
                pivots.s1
            } else {
                entry - risk * config.min_reward_risk
            };
            Some(SuggestedLevels {
                entry,
                stop,
                target,
            })
        }
        Trend::Neutral => None,
    }
}

/// Classify one timeframe's market structure.
///
/// Never fails: a series shorter than `min_bars` yields a degraded verdict
/// with `status: insufficient_data`. Deterministic and idempotent: the same
/// immutable series always produces an identical verdict.
pub fn classify(series: &CandleSeries, config: &StructureConfig) -> StructureVerdict {
    if series.len() < config.min_bars {
        return StructureVerdict::insufficient_data();
    }

    let snapshot = compute_snapshot(series);
    let current_price = series.last().map(|c| c.close);

    let trend = classify_trend(&snapshot);
    let momentum = classify_momentum(&snapshot, config);
    let volatility_alert = volatility_alert(&snapshot, config);

    let levels = match (trend, current_price) {
        (Trend::Neutral, _) | (_, None) => None,
        (trend, Some(entry)) => suggest_levels(trend, entry, &snapshot, config),
    };

    StructureVerdict {
        status: VerdictStatus::Ok,
        trend,
        momentum,
        volatility_alert,
        current_price,
        levels,
        indicators: Some(snapshot),
    }
}
