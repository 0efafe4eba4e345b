//! SpendGuard Core Library
//!
//! Shared functionality for the SpendGuard risk engine:
//! - Expense record model with flexible timestamp parsing
//! - Anomaly detection (z-score and mean-multiplier methods)
//! - Risk scoring (spend-risk and behavioral modes)
//! - Behavioral baseline profiling
//! - Short-horizon spending forecasts
//! - Risk fusion for access decisions
//! - Insight and smart-budget generation
//! - JSON and CSV expense ingestion

pub mod anomaly;
pub mod baseline;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod fusion;
pub mod import;
pub mod insights;
pub mod models;
pub mod risk;
pub mod stats;

pub use anomaly::{AnomalyConfig, AnomalyDetector, AnomalyMethod, AnomalyReport};
pub use baseline::{BaselineConfig, BaselineProfile, BaselineProfiler, Volatility};
pub use engine::{AnalysisEngine, AnalysisOutcome, AnalysisReport};
pub use error::{Error, Result};
pub use forecast::{Forecast, ForecastConfig, Forecaster};
pub use fusion::{AccessDecision, FinalAction, IdentityRisk};
pub use models::{ExpenseRecord, RiskLevel, TransactionSet};
pub use risk::{RiskAssessment, RiskConfig, RiskScorer, ScoringMode};
