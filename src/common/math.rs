//! Closed-form numeric helpers shared by the indicator engine.

/// Simple moving average over the trailing `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Mean over all values.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Exponential moving average over the full slice, seeded by the first value.
///
/// `ema[i] = value[i] * alpha + ema[i-1] * (1 - alpha)`, `alpha = 2 / (n + 1)`.
/// Matches pandas `ewm(span=n, adjust=False)`.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut current = values[0];
    for value in &values[1..] {
        current = value * alpha + current * (1.0 - alpha);
    }
    Some(current)
}

/// Running EMA at every index, seeded by the first value.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if values.is_empty() || period == 0 {
        return Vec::new();
    }
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut current = values[0];
    out.push(current);
    for value in &values[1..] {
        current = value * alpha + current * (1.0 - alpha);
        out.push(current);
    }
    out
}

/// Sample standard deviation (ddof = 1) over the trailing `period` values.
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    if period < 2 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    let avg = window.iter().sum::<f64>() / period as f64;
    let variance =
        window.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (period as f64 - 1.0);
    Some(variance.sqrt())
}

/// True range of a bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}
