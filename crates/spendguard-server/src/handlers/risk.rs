//! Risk assessment handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use serde::Deserialize;

use super::{build_set, parse_body};
use crate::{AppError, AppState};
use spendguard_core::{
    fusion::{AccessDecision, IdentityRisk},
    models::ExpenseRecord,
    risk::RiskAssessment,
};

/// Risk request parameters
#[derive(Debug, Deserialize)]
pub struct RiskRequest {
    pub expenses: Vec<ExpenseRecord>,
    pub total_budget: Option<f64>,
}

/// Secure risk request parameters
#[derive(Debug, Deserialize)]
pub struct SecureRiskRequest {
    pub expenses: Vec<ExpenseRecord>,
    pub total_budget: Option<f64>,
    pub identity_risk: IdentityRisk,
}

/// POST /risk - Risk assessment with optional budget
pub async fn risk(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<RiskAssessment>, AppError> {
    let req: RiskRequest = parse_body(request).await?;
    let set = build_set(req.expenses)?;

    Ok(Json(state.engine.compute_risk(&set, req.total_budget)))
}

/// POST /secure-risk - Fused finance/identity access decision
pub async fn secure_risk(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<AccessDecision>, AppError> {
    let req: SecureRiskRequest = parse_body(request).await?;
    let set = build_set(req.expenses)?;

    let decision = state
        .engine
        .secure_risk(&set, req.total_budget, req.identity_risk);

    Ok(Json(decision))
}
