//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod analysis;
pub mod health;
pub mod risk;

// Re-export all handlers for use in router
pub use analysis::*;
pub use health::*;
pub use risk::*;

use axum::extract::Request;
use serde::de::DeserializeOwned;

use crate::{AppError, MAX_BODY_SIZE};
use spendguard_core::models::{ExpenseRecord, TransactionSet};

/// Read and deserialize a JSON request body
pub(crate) async fn parse_body<T: DeserializeOwned>(request: Request) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::bad_request(&format!("Invalid request: {}", e)))
}

/// Validate expense records into a transaction set
pub(crate) fn build_set(expenses: Vec<ExpenseRecord>) -> Result<TransactionSet, AppError> {
    if expenses.is_empty() {
        return Err(AppError::bad_request("No expense records provided"));
    }
    TransactionSet::new(expenses).map_err(AppError::from_core)
}
