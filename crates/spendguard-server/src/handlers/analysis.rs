//! Spending analysis handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use serde::Deserialize;

use super::{build_set, parse_body};
use crate::{AppError, AppState};
use spendguard_core::{
    baseline::BaselineProfile,
    engine::AnalysisOutcome,
    forecast::Forecast,
    models::{ExpenseRecord, TransactionSet},
};

/// Request carrying a batch of expense records
#[derive(Debug, Deserialize)]
pub struct ExpensesRequest {
    pub expenses: Vec<ExpenseRecord>,
}

/// POST /analyze - Full spending analysis report
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let req: ExpensesRequest = parse_body(request).await?;
    let set = build_set(req.expenses)?;

    Ok(Json(state.engine.analyze(&set)))
}

/// POST /predict - Short-horizon spending forecast
pub async fn predict(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Forecast>, AppError> {
    let req: ExpensesRequest = parse_body(request).await?;
    let set = build_set(req.expenses)?;

    Ok(Json(state.engine.predict(&set)))
}

/// POST /baseline - Behavioral baseline profile
///
/// Unlike the other endpoints, an empty expense list is not rejected up
/// front: the engine reports it as insufficient data, which maps to 422.
pub async fn baseline(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<BaselineProfile>, AppError> {
    let req: ExpensesRequest = parse_body(request).await?;
    let set = TransactionSet::new(req.expenses).map_err(AppError::from_core)?;

    let profile = state
        .engine
        .build_baseline(&set)
        .map_err(AppError::from_core)?;

    Ok(Json(profile))
}
