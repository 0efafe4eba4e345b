//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::commands::{self, load_expenses};
use spendguard_core::fusion::IdentityRisk;

/// Write an expense fixture into the temp dir, returning its path
fn write_expense_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{}", contents).unwrap();
    path
}

const SAMPLE_JSON: &str = r#"[
    {"amount": 50.0, "category": "food", "timestamp": "2024-01-01T09:00:00"},
    {"amount": 55.0, "category": "food", "timestamp": "2024-01-02T10:00:00"},
    {"amount": 500.0, "category": "shopping", "timestamp": "2024-01-03T20:00:00"}
]"#;

// ========== Loader Tests ==========

#[test]
fn test_load_expenses_json() {
    let dir = TempDir::new().unwrap();
    let path = write_expense_file(&dir, "expenses.json", SAMPLE_JSON);

    let set = load_expenses(&path).unwrap();
    assert_eq!(set.len(), 3);
}

#[test]
fn test_load_expenses_csv() {
    let dir = TempDir::new().unwrap();
    let path = write_expense_file(
        &dir,
        "expenses.csv",
        "amount,category,timestamp\n50.0,food,2024-01-01T09:00:00\n55.0,food,2024-01-02T10:00:00\n",
    );

    let set = load_expenses(&path).unwrap();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_load_expenses_missing_file() {
    let result = load_expenses(std::path::Path::new("does-not-exist.json"));
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Failed to load"));
}

// ========== Analyze Command Tests ==========

#[test]
fn test_cmd_analyze() {
    let dir = TempDir::new().unwrap();
    let path = write_expense_file(&dir, "expenses.json", SAMPLE_JSON);

    let result = commands::cmd_analyze(&path, false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_expense_file(&dir, "expenses.json", SAMPLE_JSON);

    let result = commands::cmd_analyze(&path, true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_insufficient_data() {
    let dir = TempDir::new().unwrap();
    let path = write_expense_file(
        &dir,
        "expenses.json",
        r#"[{"amount": 50.0, "category": "food", "timestamp": "2024-01-01T09:00:00"}]"#,
    );

    let result = commands::cmd_analyze(&path, false);
    assert!(result.is_ok());
}

// ========== Risk Command Tests ==========

#[test]
fn test_cmd_risk_with_budget() {
    let dir = TempDir::new().unwrap();
    let path = write_expense_file(&dir, "expenses.json", SAMPLE_JSON);

    let result = commands::cmd_risk(&path, Some(300.0), false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_risk_without_budget() {
    let dir = TempDir::new().unwrap();
    let path = write_expense_file(&dir, "expenses.json", SAMPLE_JSON);

    let result = commands::cmd_risk(&path, None, true);
    assert!(result.is_ok());
}

// ========== Predict Command Tests ==========

#[test]
fn test_cmd_predict() {
    let dir = TempDir::new().unwrap();
    let path = write_expense_file(&dir, "expenses.json", SAMPLE_JSON);

    let result = commands::cmd_predict(&path, false);
    assert!(result.is_ok());
}

// ========== Baseline Command Tests ==========

#[test]
fn test_cmd_baseline() {
    let dir = TempDir::new().unwrap();
    let path = write_expense_file(&dir, "expenses.json", SAMPLE_JSON);

    let result = commands::cmd_baseline(&path, false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_baseline_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = write_expense_file(&dir, "expenses.json", "[]");

    let result = commands::cmd_baseline(&path, false);
    assert!(result.is_err());
}

// ========== Secure Command Tests ==========

#[test]
fn test_cmd_secure() {
    let dir = TempDir::new().unwrap();
    let path = write_expense_file(&dir, "expenses.json", SAMPLE_JSON);

    let result = commands::cmd_secure(&path, IdentityRisk::High, Some(200.0), false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_secure_low_identity_json() {
    let dir = TempDir::new().unwrap();
    let path = write_expense_file(&dir, "expenses.json", SAMPLE_JSON);

    let result = commands::cmd_secure(&path, IdentityRisk::Low, None, true);
    assert!(result.is_ok());
}
