//! Baseline spending profiles
//!
//! Summarizes a transaction history into the caller's "normal": daily spend
//! and frequency, typical transaction size, the hours purchases usually
//! happen, and how volatile the amounts are. Downstream consumers compare
//! live activity against this profile.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::TransactionSet;
use crate::stats;

/// Baseline profiling configuration
#[derive(Debug, Clone)]
pub struct BaselineConfig {
    /// Percentile treated as the upper edge of normal transaction size
    pub normal_txn_percentile: f64,
    /// How many habitual purchase hours to report
    pub top_hours: usize,
    /// Coefficient-of-variation edges for the volatility classes
    pub volatility_medium: f64,
    pub volatility_high: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            normal_txn_percentile: 90.0, // p90 of amounts
            top_hours: 4,
            volatility_medium: 0.5, // cv below this is low
            volatility_high: 1.0,   // cv below this is medium, above is high
        }
    }
}

/// Amount volatility classification (coefficient of variation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    Low,
    Medium,
    High,
}

impl Volatility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for Volatility {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown volatility: {}", s)),
        }
    }
}

impl std::fmt::Display for Volatility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A caller's normal spending shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineProfile {
    /// Mean of per-calendar-day totals
    pub avg_daily_spend: f64,
    /// Mean transaction amount
    pub avg_txn_amount: f64,
    /// Upper edge of normal transaction size (p90 by default)
    pub max_normal_txn: f64,
    /// Transactions per active day
    pub daily_txn_frequency: f64,
    /// Habitual purchase hours, most frequent first; ties favor the earlier
    /// hour. Shorter than the configured count when the history has fewer
    /// distinct hours.
    pub normal_hours: Vec<u32>,
    pub volatility: Volatility,
}

/// Profiler holding the classification edges
pub struct BaselineProfiler {
    config: BaselineConfig,
}

impl Default for BaselineProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl BaselineProfiler {
    pub fn new() -> Self {
        Self {
            config: BaselineConfig::default(),
        }
    }

    pub fn with_config(config: BaselineConfig) -> Self {
        Self { config }
    }

    /// Build a profile from the full history.
    ///
    /// Any non-empty set profiles; a short history just yields a noisy one.
    pub fn build(&self, set: &TransactionSet) -> Result<BaselineProfile> {
        if set.is_empty() {
            return Err(Error::insufficient(1, 0));
        }

        let amounts = set.amounts();
        let avg_txn_amount = stats::mean(&amounts)?;
        let max_normal_txn = stats::percentile(&amounts, self.config.normal_txn_percentile)?;

        let daily_totals = stats::group_totals(set.records(), |r| r.date());
        let per_day: Vec<f64> = daily_totals.values().copied().collect();
        let avg_daily_spend = stats::mean(&per_day)?;

        let active_days = daily_totals.len().max(1);
        let daily_txn_frequency = set.len() as f64 / active_days as f64;

        let sigma = stats::std_dev(&amounts)?;
        let volatility = if avg_txn_amount == 0.0 {
            Volatility::Low
        } else {
            let cv = sigma / avg_txn_amount;
            if cv < self.config.volatility_medium {
                Volatility::Low
            } else if cv < self.config.volatility_high {
                Volatility::Medium
            } else {
                Volatility::High
            }
        };

        let normal_hours = self.top_hours(set);

        debug!(
            records = set.len(),
            active_days,
            volatility = %volatility,
            "baseline profile built"
        );

        Ok(BaselineProfile {
            avg_daily_spend: stats::round2(avg_daily_spend),
            avg_txn_amount: stats::round2(avg_txn_amount),
            max_normal_txn: stats::round2(max_normal_txn),
            daily_txn_frequency: stats::round2(daily_txn_frequency),
            normal_hours,
            volatility,
        })
    }

    fn top_hours(&self, set: &TransactionSet) -> Vec<u32> {
        let counts = stats::group_counts(set.records(), |r| r.hour());
        let mut hours: Vec<(u32, usize)> = counts.into_iter().collect();
        hours.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        hours
            .into_iter()
            .take(self.config.top_hours)
            .map(|(hour, _)| hour)
            .collect()
    }
}
