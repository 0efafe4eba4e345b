//! Expense file ingestion
//!
//! Loads expense records from JSON (a bare array, or an object carrying an
//! `expenses` array) or from headered CSV with amount/category/timestamp
//! columns in any order. Both paths land in a validated [`TransactionSet`].

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{parse_timestamp, ExpenseRecord, TransactionSet};

/// Parse expense records from JSON.
pub fn parse_json<R: Read>(reader: R) -> Result<TransactionSet> {
    let value: Value = serde_json::from_reader(reader)?;
    let records: Vec<ExpenseRecord> = match value {
        Value::Array(_) => serde_json::from_value(value)?,
        Value::Object(ref map) if map.contains_key("expenses") => {
            serde_json::from_value(map["expenses"].clone())?
        }
        _ => {
            return Err(Error::Import(
                "Expected an array of expense records or an object with an \"expenses\" key"
                    .into(),
            ))
        }
    };
    debug!("Parsed {} expense records from JSON", records.len());
    TransactionSet::new(records)
}

/// Parse expense records from headered CSV.
///
/// Columns are matched by name, case-insensitively: `amount` and
/// `timestamp` (or `date`) are required, `category` is optional.
pub fn parse_csv<R: Read>(reader: R) -> Result<TransactionSet> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let amount_col = column(&headers, &["amount"])
        .ok_or_else(|| Error::Import("Missing amount column".into()))?;
    let timestamp_col = column(&headers, &["timestamp", "date"])
        .ok_or_else(|| Error::Import("Missing timestamp column".into()))?;
    let category_col = column(&headers, &["category"]);

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is file line 1; the first data row is line 2
        let line = i + 2;

        let amount_str = record
            .get(amount_col)
            .ok_or_else(|| Error::Import(format!("Line {}: missing amount", line)))?;
        let amount = amount_str
            .parse::<f64>()
            .map_err(|_| Error::InvalidRecord(format!("Line {}: bad amount: {}", line, amount_str)))?;

        let timestamp_str = record
            .get(timestamp_col)
            .ok_or_else(|| Error::Import(format!("Line {}: missing timestamp", line)))?;
        let timestamp = parse_timestamp(timestamp_str)
            .map_err(|_| Error::InvalidRecord(format!("Line {}: bad timestamp: {}", line, timestamp_str)))?;

        let category = category_col
            .and_then(|col| record.get(col))
            .filter(|s| !s.is_empty())
            .unwrap_or("unknown")
            .to_string();

        records.push(ExpenseRecord::new(amount, category, timestamp));
    }

    debug!("Parsed {} expense records from CSV", records.len());
    TransactionSet::new(records)
}

/// Load a transaction set from a file, dispatching on the extension.
pub fn load_path(path: &Path) -> Result<TransactionSet> {
    let file = std::fs::File::open(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json(file),
        Some("csv") => parse_csv(file),
        _ => Err(Error::Import(format!(
            "Unsupported file type: {} (expected .json or .csv)",
            path.display()
        ))),
    }
}

fn column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| names.iter().any(|name| header.eq_ignore_ascii_case(name)))
}
