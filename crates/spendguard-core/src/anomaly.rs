//! Spending anomaly detection
//!
//! Two strategies over the same transaction set:
//! - Z-score: flags the latest transaction when it sits more than
//!   `z_threshold` standard deviations above the mean. Needs a few records
//!   before the deviation is meaningful.
//! - Mean-multiplier: flags the largest transaction when it exceeds the
//!   mean by a fixed factor. Works down to a single record.
//!
//! `detect` picks the strategy from the record count; `detect_with_method`
//! forces one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::TransactionSet;
use crate::stats;

/// Anomaly detection configuration
#[derive(Debug, Clone)]
pub struct AnomalyConfig {
    /// Standard deviations above the mean before the latest record is flagged
    pub z_threshold: f64,
    /// Minimum records for the z-score strategy
    pub zscore_min_records: usize,
    /// Fallback multiplier: flag when max > mean * multiplier
    pub mean_multiplier: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            z_threshold: 2.0,        // latest > mean + 2 sigma
            zscore_min_records: 3,   // sigma needs history
            mean_multiplier: 1.5,    // max > 1.5x mean
        }
    }
}

/// Strategy used for a detection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyMethod {
    /// Latest record vs mean + z_threshold * sigma
    ZScore,
    /// Max record vs mean * multiplier
    MeanMultiplier,
}

impl AnomalyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZScore => "z_score",
            Self::MeanMultiplier => "mean_multiplier",
        }
    }
}

impl std::str::FromStr for AnomalyMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "z_score" | "zscore" => Ok(Self::ZScore),
            "mean_multiplier" | "multiplier" => Ok(Self::MeanMultiplier),
            _ => Err(format!("Unknown anomaly method: {}", s)),
        }
    }
}

impl std::fmt::Display for AnomalyMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a detection pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub anomaly: bool,
    pub method: AnomalyMethod,
    /// The amount the strategy judged (latest for z-score, max otherwise)
    pub trigger_amount: f64,
    pub mean: f64,
    pub reason: String,
}

/// Detector holding the strategy thresholds
pub struct AnomalyDetector {
    config: AnomalyConfig,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl AnomalyDetector {
    pub fn new() -> Self {
        Self {
            config: AnomalyConfig::default(),
        }
    }

    pub fn with_config(config: AnomalyConfig) -> Self {
        Self { config }
    }

    /// Detect with the strategy picked from the record count: z-score when
    /// there is enough history, mean-multiplier otherwise.
    pub fn detect(&self, set: &TransactionSet) -> Result<AnomalyReport> {
        let method = if set.len() >= self.config.zscore_min_records {
            AnomalyMethod::ZScore
        } else {
            AnomalyMethod::MeanMultiplier
        };
        self.detect_with_method(set, method)
    }

    /// Detect with an explicit strategy. The z-score strategy still requires
    /// its minimum record count.
    pub fn detect_with_method(
        &self,
        set: &TransactionSet,
        method: AnomalyMethod,
    ) -> Result<AnomalyReport> {
        if set.is_empty() {
            return Err(Error::insufficient(1, 0));
        }

        let amounts = set.amounts();
        let mean = stats::mean(&amounts)?;

        let (flagged, trigger_amount) = match method {
            AnomalyMethod::ZScore => {
                if set.len() < self.config.zscore_min_records {
                    return Err(Error::insufficient(self.config.zscore_min_records, set.len()));
                }
                let sigma = stats::std_dev(&amounts)?;
                // latest() is Some: the set is non-empty
                let latest = set.latest().map(|r| r.amount).unwrap_or_default();
                (latest > mean + self.config.z_threshold * sigma, latest)
            }
            AnomalyMethod::MeanMultiplier => {
                let max = stats::max_value(&amounts)?;
                (max > mean * self.config.mean_multiplier, max)
            }
        };

        debug!(
            method = %method,
            flagged,
            trigger_amount,
            mean,
            "anomaly detection pass"
        );

        let reason = if flagged {
            format!(
                "Expense {:.2} is unusually high compared to your average {:.2}",
                trigger_amount, mean
            )
        } else {
            "Spending is within normal range".to_string()
        };

        Ok(AnomalyReport {
            anomaly: flagged,
            method,
            trigger_amount: stats::round2(trigger_amount),
            mean: stats::round2(mean),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_timestamp, ExpenseRecord};

    fn set(amounts: &[f64]) -> TransactionSet {
        let records = amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| {
                let ts = format!("2024-01-{:02}", i + 1);
                ExpenseRecord::new(amount, "misc", parse_timestamp(&ts).unwrap())
            })
            .collect();
        TransactionSet::new(records).unwrap()
    }

    #[test]
    fn test_zscore_flags_latest_spike() {
        let detector = AnomalyDetector::new();
        // Stable history then a large final expense. With a flat baseline the
        // spike itself inflates sigma, so the history has to be long enough.
        let report = detector
            .detect(&set(&[100.0, 100.0, 100.0, 100.0, 100.0, 500.0]))
            .unwrap();
        assert_eq!(report.method, AnomalyMethod::ZScore);
        assert!(report.anomaly);
        assert_eq!(report.trigger_amount, 500.0);
        assert!(report.reason.contains("unusually high"));
    }

    #[test]
    fn test_zscore_normal_spending_not_flagged() {
        let detector = AnomalyDetector::new();
        let report = detector.detect(&set(&[100.0, 105.0, 95.0, 102.0])).unwrap();
        assert_eq!(report.method, AnomalyMethod::ZScore);
        assert!(!report.anomaly);
        assert_eq!(report.reason, "Spending is within normal range");
    }

    #[test]
    fn test_zscore_ignores_earlier_spike() {
        let detector = AnomalyDetector::new();
        // The spike is not the latest record, so z-score does not flag
        let report = detector.detect(&set(&[500.0, 100.0, 100.0, 100.0])).unwrap();
        assert_eq!(report.method, AnomalyMethod::ZScore);
        assert!(!report.anomaly);
    }

    #[test]
    fn test_small_set_falls_back_to_multiplier() {
        let detector = AnomalyDetector::new();
        let report = detector.detect(&set(&[100.0, 300.0])).unwrap();
        assert_eq!(report.method, AnomalyMethod::MeanMultiplier);
        // max 300 is exactly mean 200 * 1.5; the comparison is strict
        assert!(!report.anomaly);

        let report = detector.detect(&set(&[100.0, 400.0])).unwrap();
        // max 400 > mean 250 * 1.5
        assert!(report.anomaly);
    }

    #[test]
    fn test_single_record_multiplier() {
        let detector = AnomalyDetector::new();
        let report = detector.detect(&set(&[250.0])).unwrap();
        assert_eq!(report.method, AnomalyMethod::MeanMultiplier);
        // A lone record is its own mean; never above 1.5x itself
        assert!(!report.anomaly);
    }

    #[test]
    fn test_empty_set_errors() {
        let detector = AnomalyDetector::new();
        assert!(detector.detect(&set(&[])).is_err());
    }

    #[test]
    fn test_explicit_zscore_needs_min_records() {
        let detector = AnomalyDetector::new();
        let result = detector.detect_with_method(&set(&[100.0, 400.0]), AnomalyMethod::ZScore);
        assert!(matches!(
            result,
            Err(Error::InsufficientData { needed: 3, got: 2 })
        ));
    }

    #[test]
    fn test_explicit_multiplier_on_large_set() {
        let detector = AnomalyDetector::new();
        let report = detector
            .detect_with_method(&set(&[100.0, 100.0, 100.0, 600.0]), AnomalyMethod::MeanMultiplier)
            .unwrap();
        assert_eq!(report.method, AnomalyMethod::MeanMultiplier);
        // max 600 > mean 225 * 1.5
        assert!(report.anomaly);
    }

    #[test]
    fn test_all_zero_amounts() {
        let detector = AnomalyDetector::new();
        let report = detector.detect(&set(&[0.0, 0.0, 0.0])).unwrap();
        assert!(!report.anomaly);
    }

    #[test]
    fn test_report_amounts_rounded() {
        let detector = AnomalyDetector::new();
        let report = detector.detect(&set(&[10.111, 10.222, 10.333])).unwrap();
        assert_eq!(report.mean, 10.22);
    }

    #[test]
    fn test_anomaly_method_round_trip() {
        assert_eq!("z_score".parse::<AnomalyMethod>().unwrap(), AnomalyMethod::ZScore);
        assert_eq!(
            "mean_multiplier".parse::<AnomalyMethod>().unwrap(),
            AnomalyMethod::MeanMultiplier
        );
        assert!("nope".parse::<AnomalyMethod>().is_err());
        assert_eq!(AnomalyMethod::ZScore.to_string(), "z_score");
    }
}
