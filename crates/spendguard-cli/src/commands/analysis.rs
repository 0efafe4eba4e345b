//! Analysis command implementations
//!
//! This module contains:
//! - `load_expenses` - Shared expense-file loader
//! - `cmd_analyze` - Full analysis report
//! - `cmd_risk` - Risk assessment
//! - `cmd_predict` - Spending forecast
//! - `cmd_baseline` - Behavioral baseline profile
//! - `cmd_secure` - Fused access decision

use std::path::Path;

use anyhow::{Context, Result};

use spendguard_core::engine::{AnalysisEngine, AnalysisOutcome};
use spendguard_core::forecast::Forecast;
use spendguard_core::fusion::{FinalAction, IdentityRisk};
use spendguard_core::import;
use spendguard_core::models::{RiskLevel, TransactionSet};

/// Load and validate an expense file (.json or .csv)
pub fn load_expenses(path: &Path) -> Result<TransactionSet> {
    import::load_path(path)
        .with_context(|| format!("Failed to load expenses from {}", path.display()))
}

fn level_icon(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "🟢",
        RiskLevel::Medium => "🟡",
        RiskLevel::High => "🔴",
    }
}

fn action_icon(action: FinalAction) -> &'static str {
    match action {
        FinalAction::Allow => "✅",
        FinalAction::Warn => "⚠️",
        FinalAction::Verify => "🔍",
        FinalAction::Block => "⛔",
    }
}

pub fn cmd_analyze(file: &Path, json: bool) -> Result<()> {
    let set = load_expenses(file)?;
    let engine = AnalysisEngine::new();
    let outcome = engine.analyze(&set);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("🔍 Analyzing {} expense records...", set.len());

    match outcome {
        AnalysisOutcome::InsufficientData { message } => {
            println!();
            println!("ℹ️  {}", message);
        }
        AnalysisOutcome::Report(report) => {
            println!();
            println!("📊 Analysis Report");
            println!("   ─────────────────────────────");
            println!("   Average spend: {:.2}", report.average_spend);
            println!("   Highest spend: {:.2}", report.highest_spend);
            if report.anomaly_detected {
                println!("   ⚠️  Anomaly: {}", report.reason);
            } else {
                println!("   Anomaly: none");
            }
            println!(
                "   Risk: {} {}/100 ({})",
                level_icon(report.risk_level),
                report.risk_score,
                report.risk_level
            );
            println!("   7-day forecast: {:.2}", report.future_prediction_7_days);

            if !report.smart_budgets.is_empty() {
                println!();
                println!("💰 Smart Budgets");
                for (category, budget) in &report.smart_budgets {
                    println!("   {}: {:.2}", category, budget);
                }
            }

            if !report.insights.is_empty() {
                println!();
                println!("💡 Insights");
                for insight in &report.insights {
                    println!("   • {}", insight);
                }
            }
        }
    }

    Ok(())
}

pub fn cmd_risk(file: &Path, budget: Option<f64>, json: bool) -> Result<()> {
    let set = load_expenses(file)?;
    let engine = AnalysisEngine::new();
    let assessment = engine.compute_risk(&set, budget);

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    println!("🎯 Scoring {} expense records...", set.len());
    match budget {
        Some(b) => println!("   Budget: {:.2}", b),
        None => println!("   Budget: none"),
    }
    println!();
    println!(
        "   Risk: {} {}/100 ({})",
        level_icon(assessment.level),
        assessment.score,
        assessment.level
    );
    println!("   {}", assessment.reason);

    Ok(())
}

pub fn cmd_predict(file: &Path, json: bool) -> Result<()> {
    let set = load_expenses(file)?;
    let engine = AnalysisEngine::new();
    let forecast = engine.predict(&set);

    if json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
        return Ok(());
    }

    println!("🔮 Forecasting from {} expense records...", set.len());
    println!();
    match forecast {
        Forecast::InsufficientHistory { message } => println!("ℹ️  {}", message),
        Forecast::Projection {
            avg_daily_spend,
            next_7_days_estimate,
            message,
        } => {
            println!("   Average daily spend: {:.2}", avg_daily_spend);
            println!("   Next 7 days: {:.2}", next_7_days_estimate);
            println!("   {}", message);
        }
    }

    Ok(())
}

pub fn cmd_baseline(file: &Path, json: bool) -> Result<()> {
    let set = load_expenses(file)?;
    let engine = AnalysisEngine::new();
    let profile = engine.build_baseline(&set)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("📐 Baseline from {} expense records...", set.len());
    println!();
    println!("   Average daily spend: {:.2}", profile.avg_daily_spend);
    println!("   Average transaction: {:.2}", profile.avg_txn_amount);
    println!("   Normal max transaction: {:.2}", profile.max_normal_txn);
    println!("   Daily frequency: {:.2}", profile.daily_txn_frequency);
    println!(
        "   Normal hours: {}",
        profile
            .normal_hours
            .iter()
            .map(|h| format!("{:02}:00", h))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("   Volatility: {}", profile.volatility);

    Ok(())
}

pub fn cmd_secure(
    file: &Path,
    identity: IdentityRisk,
    budget: Option<f64>,
    json: bool,
) -> Result<()> {
    let set = load_expenses(file)?;
    let engine = AnalysisEngine::new();
    let decision = engine.secure_risk(&set, budget, identity);

    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
        return Ok(());
    }

    println!("🔐 Evaluating access decision...");
    println!(
        "   Finance risk: {} {} (score {})",
        level_icon(decision.finance_risk),
        decision.finance_risk,
        decision.finance_score
    );
    println!("   Identity risk: {}", decision.identity_risk);
    println!();
    println!(
        "   Decision: {} {}",
        action_icon(decision.final_action),
        decision.final_action
    );

    Ok(())
}
