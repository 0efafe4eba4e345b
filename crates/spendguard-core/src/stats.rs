//! Statistics primitives shared by the analyzers
//!
//! Small, dependency-free building blocks: mean, population standard
//! deviation, interpolated percentiles, and group-by aggregation. Every
//! function that needs at least one value fails with an insufficient-data
//! error on empty input instead of returning NaN.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::models::ExpenseRecord;

/// Arithmetic mean
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(Error::insufficient(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by n, not n-1)
pub fn std_dev(values: &[f64]) -> Result<f64> {
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    Ok(variance.sqrt())
}

/// Percentile by linear interpolation between closest ranks.
///
/// `p` is clamped to [0, 100].
pub fn percentile(values: &[f64], p: f64) -> Result<f64> {
    if values.is_empty() {
        return Err(Error::insufficient(1, 0));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let p = p.clamp(0.0, 100.0);
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return Ok(sorted[lower]);
    }
    let weight = rank - lower as f64;
    Ok(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

/// Largest value
pub fn max_value(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(Error::insufficient(1, 0));
    }
    Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Sum of amounts per group key
pub fn group_totals<K, F>(records: &[ExpenseRecord], key: F) -> HashMap<K, f64>
where
    K: Eq + Hash,
    F: Fn(&ExpenseRecord) -> K,
{
    let mut totals: HashMap<K, f64> = HashMap::new();
    for record in records {
        *totals.entry(key(record)).or_insert(0.0) += record.amount;
    }
    totals
}

/// Record count per group key
pub fn group_counts<K, F>(records: &[ExpenseRecord], key: F) -> HashMap<K, usize>
where
    K: Eq + Hash,
    F: Fn(&ExpenseRecord) -> K,
{
    let mut counts: HashMap<K, usize> = HashMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

/// Round to 2 decimal places for presentation.
///
/// Internal computation stays full precision; only values that leave the
/// engine pass through this.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
