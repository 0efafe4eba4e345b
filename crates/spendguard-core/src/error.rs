//! Error types for SpendGuard

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not enough data: need at least {needed} records, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Import error: {0}")]
    Import(String),
}

impl Error {
    /// Shorthand for the minimum-record check used across analyzers.
    pub fn insufficient(needed: usize, got: usize) -> Self {
        Self::InsufficientData { needed, got }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
