//! Liveness handlers

use axum::Json;

/// GET / - Plain-text liveness banner
pub async fn root() -> &'static str {
    "SpendGuard server is running"
}

/// GET /health - Health check
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
