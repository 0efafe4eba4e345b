//! Plain-language insights and smart budget suggestions

use std::collections::BTreeMap;

use crate::anomaly::AnomalyReport;
use crate::models::{RiskLevel, TransactionSet};
use crate::risk::RiskAssessment;
use crate::stats;

/// Buffer applied over each category's historical average
const BUDGET_BUFFER: f64 = 1.15;

/// Insight strings for a report, in fixed order: spike, risk, top category.
pub fn generate_insights(
    anomaly: &AnomalyReport,
    risk: &RiskAssessment,
    set: &TransactionSet,
) -> Vec<String> {
    let mut insights = Vec::new();
    if anomaly.anomaly {
        insights.push("Unusual expense spike detected".to_string());
    }
    if risk.level == RiskLevel::High {
        insights.push("High-risk spending behavior detected".to_string());
    }
    if let Some(category) = top_category(set) {
        insights.push(format!("Highest spending category: {}", category));
    }
    insights
}

/// Largest-total category; ties break alphabetically.
fn top_category(set: &TransactionSet) -> Option<String> {
    let totals = stats::group_totals(set.records(), |r| r.category.clone());
    totals
        .into_iter()
        .max_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.0.cmp(&a.0))
        })
        .map(|(category, _)| category)
}

/// Suggested per-category budgets: the historical per-transaction average
/// for the category plus a 15% buffer, rounded to cents.
pub fn smart_budgets(set: &TransactionSet) -> BTreeMap<String, f64> {
    let totals = stats::group_totals(set.records(), |r| r.category.clone());
    let counts = stats::group_counts(set.records(), |r| r.category.clone());
    totals
        .into_iter()
        .map(|(category, total)| {
            let count = counts.get(&category).copied().unwrap_or(1).max(1);
            let average = total / count as f64;
            (category, stats::round2(average * BUDGET_BUFFER))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anomaly::AnomalyMethod;
    use crate::models::{parse_timestamp, ExpenseRecord};

    fn set(records: &[(f64, &str)]) -> TransactionSet {
        let records = records
            .iter()
            .enumerate()
            .map(|(i, &(amount, category))| {
                let ts = format!("2024-01-{:02}", (i % 28) + 1);
                ExpenseRecord::new(amount, category, parse_timestamp(&ts).unwrap())
            })
            .collect();
        TransactionSet::new(records).unwrap()
    }

    fn anomaly_report(flagged: bool) -> AnomalyReport {
        AnomalyReport {
            anomaly: flagged,
            method: AnomalyMethod::ZScore,
            trigger_amount: 500.0,
            mean: 100.0,
            reason: "test".to_string(),
        }
    }

    fn assessment(level: RiskLevel) -> RiskAssessment {
        RiskAssessment {
            score: 75,
            level,
            reason: "test".to_string(),
        }
    }

    #[test]
    fn test_insights_fixed_order() {
        let set = set(&[(50.0, "food"), (500.0, "shopping")]);
        let insights = generate_insights(&anomaly_report(true), &assessment(RiskLevel::High), &set);
        assert_eq!(
            insights,
            vec![
                "Unusual expense spike detected",
                "High-risk spending behavior detected",
                "Highest spending category: shopping",
            ]
        );
    }

    #[test]
    fn test_insights_quiet_history_keeps_category() {
        let set = set(&[(50.0, "food"), (20.0, "travel")]);
        let insights = generate_insights(&anomaly_report(false), &assessment(RiskLevel::Low), &set);
        assert_eq!(insights, vec!["Highest spending category: food"]);
    }

    #[test]
    fn test_top_category_tie_breaks_alphabetically() {
        let set = set(&[(30.0, "shopping"), (30.0, "food")]);
        let insights = generate_insights(&anomaly_report(false), &assessment(RiskLevel::Low), &set);
        assert_eq!(insights, vec!["Highest spending category: food"]);
    }

    #[test]
    fn test_smart_budgets_buffer_and_rounding() {
        let set = set(&[(50.0, "food"), (55.0, "food"), (500.0, "shopping")]);
        let budgets = smart_budgets(&set);
        // food averages 52.5, buffered to 60.375 and rounded to cents
        assert_eq!(budgets["food"], 60.38);
        assert_eq!(budgets["shopping"], 575.0);
        assert_eq!(budgets.len(), 2);
    }

    #[test]
    fn test_smart_budgets_empty_set() {
        let set = set(&[]);
        assert!(smart_budgets(&set).is_empty());
    }
}
