//! Descriptive statistics helpers for the pricing engine.
//!
//! Everything operates on `f64` because the suggested prices are
//! user-visible numbers with fixed rounding points; empty inputs yield 0.0
//! rather than an error (an empty category is a supported state).

pub(super) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median with the even-length convention of averaging the two middle values.
pub(super) fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population (not sample) standard deviation.
pub(super) fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance =
        values.iter().map(|value| (value - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

pub(super) fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
