//! Short-horizon spending forecasts
//!
//! A deliberately naive projection: the mean of the most recent amounts is
//! treated as one day of spend and extended across the horizon. It carries
//! no seasonality or trend model; the message on the projection says so.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::TransactionSet;
use crate::stats;

/// Forecast configuration
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    /// Minimum records before a projection is attempted
    pub min_records: usize,
    /// How many recent amounts feed the daily average
    pub window: usize,
    /// Days projected forward
    pub horizon_days: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_records: 5,
            window: 7,      // last 7 amounts
            horizon_days: 7, // one week out
        }
    }
}

/// Forecast outcome: a projection, or a marker when history is too short
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Forecast {
    Projection {
        avg_daily_spend: f64,
        next_7_days_estimate: f64,
        message: String,
    },
    InsufficientHistory {
        message: String,
    },
}

/// Forecaster holding the window settings
pub struct Forecaster {
    config: ForecastConfig,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Forecaster {
    pub fn new() -> Self {
        Self {
            config: ForecastConfig::default(),
        }
    }

    pub fn with_config(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// Project spending over the horizon from the recent window.
    pub fn predict(&self, set: &TransactionSet) -> Forecast {
        if set.len() < self.config.min_records {
            debug!(records = set.len(), "too few records to forecast");
            return Forecast::InsufficientHistory {
                message: "Not enough data to predict spending".to_string(),
            };
        }

        let amounts = set.amounts();
        let start = amounts.len().saturating_sub(self.config.window);
        let recent = &amounts[start..];
        let avg_daily = stats::mean(recent).unwrap_or_default();
        let estimate = stats::round2(avg_daily * self.config.horizon_days as f64);

        debug!(window = recent.len(), avg_daily, estimate, "forecast built");

        Forecast::Projection {
            avg_daily_spend: stats::round2(avg_daily),
            next_7_days_estimate: estimate,
            message: "Projection assumes recent daily spending continues".to_string(),
        }
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
                let ts = format!("2024-01-{:02}", (i % 28) + 1);
                ExpenseRecord::new(amount, "misc", parse_timestamp(&ts).unwrap())
            })
            .collect();
        TransactionSet::new(records).unwrap()
    }

    #[test]
    fn test_too_few_records_yields_marker() {
        let forecaster = Forecaster::new();
        let forecast = forecaster.predict(&set(&[10.0, 20.0, 30.0, 40.0]));
        assert_eq!(
            forecast,
            Forecast::InsufficientHistory {
                message: "Not enough data to predict spending".to_string(),
            }
        );
    }

    #[test]
    fn test_five_records_project() {
        let forecaster = Forecaster::new();
        let forecast = forecaster.predict(&set(&[10.0, 20.0, 30.0, 40.0, 50.0]));
        match forecast {
            Forecast::Projection {
                avg_daily_spend,
                next_7_days_estimate,
                ..
            } => {
                assert_eq!(avg_daily_spend, 30.0);
                assert_eq!(next_7_days_estimate, 210.0);
            }
            Forecast::InsufficientHistory { .. } => panic!("expected a projection"),
        }
    }

    #[test]
    fn test_window_uses_last_seven_amounts() {
        let forecaster = Forecaster::new();
        let amounts: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let forecast = forecaster.predict(&set(&amounts));
        match forecast {
            Forecast::Projection {
                avg_daily_spend,
                next_7_days_estimate,
                ..
            } => {
                // 4..=10 average to 7
                assert_eq!(avg_daily_spend, 7.0);
                assert_eq!(next_7_days_estimate, 49.0);
            }
            Forecast::InsufficientHistory { .. } => panic!("expected a projection"),
        }
    }

    #[test]
    fn test_estimate_rounded_to_cents() {
        let forecaster = Forecaster::new();
        let forecast = forecaster.predict(&set(&[10.0, 10.0, 10.0, 10.0, 10.10]));
        match forecast {
            Forecast::Projection {
                avg_daily_spend,
                next_7_days_estimate,
                ..
            } => {
                assert_eq!(avg_daily_spend, 10.02);
                assert_eq!(next_7_days_estimate, 70.14);
            }
            Forecast::InsufficientHistory { .. } => panic!("expected a projection"),
        }
    }

    #[test]
    fn test_serde_shapes() {
        let projection = Forecast::Projection {
            avg_daily_spend: 10.0,
            next_7_days_estimate: 70.0,
            message: "Projection assumes recent daily spending continues".to_string(),
        };
        let json = serde_json::to_value(&projection).unwrap();
        assert_eq!(json["next_7_days_estimate"], 70.0);

        let marker: Forecast =
            serde_json::from_str(r#"{"message": "Not enough data to predict spending"}"#).unwrap();
        assert!(matches!(marker, Forecast::InsufficientHistory { .. }));
    }
}
