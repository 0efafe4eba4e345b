//! Analysis engine facade
//!
//! Bundles the analyzers behind the operations the transports expose.
//! Every operation is stateless and side-effect free: the same records give
//! the same answer, decision timestamps aside.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::anomaly::AnomalyDetector;
use crate::baseline::{BaselineProfile, BaselineProfiler};
use crate::error::Result;
use crate::forecast::{Forecast, Forecaster};
use crate::fusion::{self, AccessDecision, IdentityRisk};
use crate::insights;
use crate::models::{RiskLevel, TransactionSet};
use crate::risk::{RiskAssessment, RiskScorer, ScoringMode};
use crate::stats;

/// Minimum records before the full analysis runs
const ANALYZE_MIN_RECORDS: usize = 3;

/// Full spending report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub average_spend: f64,
    pub highest_spend: f64,
    pub anomaly_detected: bool,
    pub reason: String,
    /// 0 when the history is too short to forecast
    pub future_prediction_7_days: f64,
    pub smart_budgets: BTreeMap<String, f64>,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub insights: Vec<String>,
}

/// Analysis outcome: the report, or a marker for thin histories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Report(AnalysisReport),
    InsufficientData { message: String },
}

impl AnalysisOutcome {
    fn insufficient() -> Self {
        Self::InsufficientData {
            message: "Not enough data for AI analysis".to_string(),
        }
    }
}

/// The analyzers behind the public operations
pub struct AnalysisEngine {
    anomaly: AnomalyDetector,
    scorer: RiskScorer,
    profiler: BaselineProfiler,
    forecaster: Forecaster,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self {
            anomaly: AnomalyDetector::new(),
            scorer: RiskScorer::new(),
            profiler: BaselineProfiler::new(),
            forecaster: Forecaster::new(),
        }
    }

    /// Full report over a history.
    ///
    /// Risk runs in behavioral mode; this operation carries no budget
    /// figure. Histories under three records get the marker outcome.
    pub fn analyze(&self, set: &TransactionSet) -> AnalysisOutcome {
        debug!(records = set.len(), "analyze");
        if set.len() < ANALYZE_MIN_RECORDS {
            return AnalysisOutcome::insufficient();
        }

        let amounts = set.amounts();
        let average_spend = stats::mean(&amounts).unwrap_or_default();
        let highest_spend = stats::max_value(&amounts).unwrap_or_default();

        let anomaly = match self.anomaly.detect(set) {
            Ok(report) => report,
            Err(_) => return AnalysisOutcome::insufficient(),
        };
        let risk = self.scorer.score(set, ScoringMode::Behavioral);

        let future_prediction_7_days = match self.forecaster.predict(set) {
            Forecast::Projection {
                next_7_days_estimate,
                ..
            } => next_7_days_estimate,
            Forecast::InsufficientHistory { .. } => 0.0,
        };

        let insight_list = insights::generate_insights(&anomaly, &risk, set);

        AnalysisOutcome::Report(AnalysisReport {
            average_spend: stats::round2(average_spend),
            highest_spend: stats::round2(highest_spend),
            anomaly_detected: anomaly.anomaly,
            reason: anomaly.reason,
            future_prediction_7_days,
            smart_budgets: insights::smart_budgets(set),
            risk_score: risk.score,
            risk_level: risk.level,
            insights: insight_list,
        })
    }

    /// Spend-risk assessment. The optional budget maps onto
    /// [`ScoringMode::SpendRisk`] here and nowhere else.
    pub fn compute_risk(&self, set: &TransactionSet, total_budget: Option<f64>) -> RiskAssessment {
        debug!(records = set.len(), "compute risk");
        self.scorer.score(set, ScoringMode::SpendRisk { total_budget })
    }

    /// Short-horizon spending forecast.
    pub fn predict(&self, set: &TransactionSet) -> Forecast {
        debug!(records = set.len(), "predict");
        self.forecaster.predict(set)
    }

    /// Baseline spending profile.
    pub fn build_baseline(&self, set: &TransactionSet) -> Result<BaselineProfile> {
        debug!(records = set.len(), "build baseline");
        self.profiler.build(set)
    }

    /// Score the spending, fuse with the identity signal, stamp the result.
    pub fn secure_risk(
        &self,
        set: &TransactionSet,
        total_budget: Option<f64>,
        identity: IdentityRisk,
    ) -> AccessDecision {
        let assessment = self.compute_risk(set, total_budget);
        let final_action = fusion::fuse(assessment.level, identity);
        debug!(
            finance = %assessment.level,
            identity = %identity,
            action = %final_action,
            "access decision fused"
        );
        AccessDecision {
            finance_risk: assessment.level,
            finance_score: assessment.score,
            identity_risk: identity,
            final_action,
            timestamp: Utc::now(),
        }
    }
}
