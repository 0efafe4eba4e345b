//! Domain models for SpendGuard

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single expense transaction as supplied by the caller.
///
/// Records are treated as already-settled history: the engine never mutates
/// them and assumes the caller supplies them in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub amount: f64,
    #[serde(default = "default_category")]
    pub category: String,
    /// Accepts ISO date-times or bare dates (parsed as midnight)
    #[serde(with = "flexible_timestamp")]
    pub timestamp: NaiveDateTime,
}

fn default_category() -> String {
    "unknown".to_string()
}

impl ExpenseRecord {
    pub fn new(amount: f64, category: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            amount,
            category: category.into(),
            timestamp,
        }
    }

    /// Calendar date portion of the timestamp
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Hour-of-day portion of the timestamp (0-23)
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }
}

/// Parse a record timestamp from its wire form.
///
/// Accepted formats, tried in order:
/// - `2024-01-03T14:30:00` / `2024-01-03 14:30:00`
/// - `2024-01-03T14:30` / `2024-01-03 14:30`
/// - `2024-01-03` (midnight)
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in formats {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(ts);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        // Bare dates land at midnight
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }
    Err(Error::InvalidRecord(format!("Unparseable timestamp: {}", s)))
}

mod flexible_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}

/// An immutable, ordered batch of expense records.
///
/// Construction validates every record; all analyzers consume sets rather
/// than raw vectors so malformed amounts are rejected once, at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSet {
    records: Vec<ExpenseRecord>,
}

impl TransactionSet {
    /// Build a set from caller-supplied records, preserving their order.
    ///
    /// Rejects non-finite or negative amounts.
    pub fn new(records: Vec<ExpenseRecord>) -> Result<Self> {
        for (i, record) in records.iter().enumerate() {
            if !record.amount.is_finite() {
                return Err(Error::InvalidRecord(format!(
                    "Record {}: amount must be a finite number",
                    i
                )));
            }
            if record.amount < 0.0 {
                return Err(Error::InvalidRecord(format!(
                    "Record {}: amount must not be negative, got {}",
                    i, record.amount
                )));
            }
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn amounts(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.amount).collect()
    }

    /// The most recent record (last in supplied order)
    pub fn latest(&self) -> Option<&ExpenseRecord> {
        self.records.last()
    }

    pub fn total_spent(&self) -> f64 {
        self.records.iter().map(|r| r.amount).sum()
    }
}

/// Financial risk classification produced by the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
