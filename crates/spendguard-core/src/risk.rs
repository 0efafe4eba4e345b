//! Composite spending risk scoring
//!
//! One scorer, two scoring modes picked explicitly by the caller:
//! - Spend-risk: spike frequency plus budget burn rate, for flows that can
//!   supply a budget figure.
//! - Behavioral: anomaly, overspend, and category-concentration penalties,
//!   for flows without one.
//!
//! Scores read risk-up in both modes: 0 is quiet history, 100 is maximal
//! risk. Levels are classified from the rounded integer score so the score
//! and level a consumer sees never disagree.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::anomaly::AnomalyDetector;
use crate::models::{RiskLevel, TransactionSet};
use crate::stats;

/// Risk scoring configuration
#[derive(Debug, Clone)]
pub struct RiskConfig {
    /// Minimum records before scoring; below this the placeholder is returned
    pub min_records: usize,
    /// Score reported when there is not enough history
    pub placeholder_score: u8,

    // Spend-risk mode
    /// Spike threshold multiplier when a budget is supplied
    pub spike_multiplier_budget: f64,
    /// Spike threshold multiplier without a budget
    pub spike_multiplier_no_budget: f64,
    /// Points carried by the spike fraction
    pub spike_weight: f64,
    /// Points per percent of budget spent
    pub burn_factor: f64,
    /// Cap on budget-burn points
    pub burn_weight: f64,
    /// Spend-risk level thresholds (score at or above)
    pub spend_high: u8,
    pub spend_medium: u8,

    // Behavioral mode
    /// Penalty when the anomaly detector flags the set
    pub anomaly_penalty: f64,
    /// Cap on latest-vs-average overspend points
    pub overspend_weight: f64,
    /// Points carried by category concentration
    pub imbalance_weight: f64,
    /// Behavioral level thresholds (score strictly above)
    pub behavioral_high: u8,
    pub behavioral_medium: u8,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            min_records: 3,
            placeholder_score: 10,
            spike_multiplier_budget: 1.6,    // amount > 1.6x mean counts as a spike
            spike_multiplier_no_budget: 1.8, // 1.8x mean when no budget is given
            spike_weight: 40.0,
            burn_factor: 0.6, // 0.6 points per percent of budget
            burn_weight: 60.0,
            spend_high: 70,
            spend_medium: 40,
            anomaly_penalty: 40.0,
            overspend_weight: 40.0,
            imbalance_weight: 20.0,
            behavioral_high: 50,
            behavioral_medium: 20,
        }
    }
}

/// Scoring mode, always chosen by the caller.
///
/// The scorer never infers a mode from the data; the convenience operations
/// in [`crate::engine`] document the one place the optional-budget inputs
/// map onto a mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoringMode {
    /// Spike frequency plus budget burn. A missing or non-positive budget
    /// drops the burn term and tightens nothing else.
    SpendRisk { total_budget: Option<f64> },
    /// Anomaly, overspend, and category-imbalance penalties.
    Behavioral,
}

/// Outcome of a scoring pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// 0-100, integer, higher is riskier
    pub score: u8,
    pub level: RiskLevel,
    pub reason: String,
}

/// Scorer holding the weights and thresholds
pub struct RiskScorer {
    config: RiskConfig,
    anomaly: AnomalyDetector,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskScorer {
    pub fn new() -> Self {
        Self {
            config: RiskConfig::default(),
            anomaly: AnomalyDetector::new(),
        }
    }

    pub fn with_config(config: RiskConfig) -> Self {
        Self {
            config,
            anomaly: AnomalyDetector::new(),
        }
    }

    /// Score a transaction set under an explicit mode.
    ///
    /// Sets below the minimum record count get the fixed low placeholder
    /// rather than an error; too little history is an answer, not a fault.
    pub fn score(&self, set: &TransactionSet, mode: ScoringMode) -> RiskAssessment {
        if set.len() < self.config.min_records {
            debug!(records = set.len(), "too few records, placeholder risk");
            return RiskAssessment {
                score: self.config.placeholder_score,
                level: RiskLevel::Low,
                reason: "Not enough data yet".to_string(),
            };
        }

        let assessment = match mode {
            ScoringMode::SpendRisk { total_budget } => self.score_spend_risk(set, total_budget),
            ScoringMode::Behavioral => self.score_behavioral(set),
        };
        debug!(
            score = assessment.score,
            level = %assessment.level,
            "risk scored"
        );
        assessment
    }

    fn score_spend_risk(&self, set: &TransactionSet, total_budget: Option<f64>) -> RiskAssessment {
        let amounts = set.amounts();
        let mean = stats::mean(&amounts).unwrap_or_default();

        let budget = total_budget.filter(|b| *b > 0.0);
        let multiplier = if budget.is_some() {
            self.config.spike_multiplier_budget
        } else {
            self.config.spike_multiplier_no_budget
        };

        let threshold = mean * multiplier;
        let spikes = amounts.iter().filter(|&&a| a > threshold).count();
        let spike_score = spikes as f64 / amounts.len() as f64 * self.config.spike_weight;

        let mut factors: Vec<String> = Vec::new();
        if spikes > 0 {
            factors.push(format!(
                "{} of {} transactions exceeding {:.1}x the average spend",
                spikes,
                amounts.len(),
                multiplier
            ));
        }

        let burn_score = match budget {
            Some(budget) => {
                let burn_pct = set.total_spent() / budget * 100.0;
                if burn_pct > 0.0 {
                    factors.push(format!("{:.0}% of the budget spent", burn_pct));
                }
                (burn_pct * self.config.burn_factor).min(self.config.burn_weight)
            }
            None => 0.0,
        };

        let score = clamp_score(spike_score + burn_score);
        let level = if score >= self.config.spend_high {
            RiskLevel::High
        } else if score >= self.config.spend_medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        RiskAssessment {
            score,
            level,
            reason: join_factors(factors),
        }
    }

    fn score_behavioral(&self, set: &TransactionSet) -> RiskAssessment {
        let amounts = set.amounts();
        let mean = stats::mean(&amounts).unwrap_or_default();

        let flagged = self
            .anomaly
            .detect(set)
            .map(|report| report.anomaly)
            .unwrap_or(false);
        let anomaly_penalty = if flagged { self.config.anomaly_penalty } else { 0.0 };

        let latest = set.latest().map(|r| r.amount).unwrap_or_default();
        // The +1 keeps a zero-mean history from dividing by zero
        let overspend = (latest / (mean + 1.0) * self.config.overspend_weight)
            .min(self.config.overspend_weight);

        let total = set.total_spent();
        let imbalance = if total > 0.0 {
            let by_category = stats::group_totals(set.records(), |r| r.category.clone());
            let max_category = by_category.values().copied().fold(0.0, f64::max);
            max_category / total * self.config.imbalance_weight
        } else {
            0.0
        };

        let score = clamp_score(anomaly_penalty + overspend + imbalance);
        let level = if score > self.config.behavioral_high {
            RiskLevel::High
        } else if score > self.config.behavioral_medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let mut factors: Vec<String> = Vec::new();
        if flagged {
            factors.push("an unusual expense spike".to_string());
        }
        if latest > mean {
            factors.push("a latest expense above the running average".to_string());
        }
        if imbalance >= self.config.imbalance_weight * 0.75 {
            factors.push("spending concentrated in one category".to_string());
        }

        RiskAssessment {
            score,
            level,
            reason: join_factors(factors),
        }
    }
}

fn clamp_score(raw: f64) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}

fn join_factors(factors: Vec<String>) -> String {
    if factors.is_empty() {
        "Spending is within normal range".to_string()
    } else {
        format!("Driven by {}", factors.join("; "))
    }
}
