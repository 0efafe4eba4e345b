//! SpendGuard Web Server
//!
//! Axum-based REST API over the SpendGuard analysis engine. The server is
//! stateless: every request carries its own expense records, and nothing is
//! persisted between calls.
//!
//! Endpoints:
//! - `GET /` and `GET /health` - liveness probes
//! - `POST /analyze` - full spending analysis report
//! - `POST /risk` - risk assessment with optional budget
//! - `POST /predict` - short-horizon spending forecast
//! - `POST /baseline` - behavioral baseline profile
//! - `POST /secure-risk` - fused finance/identity access decision

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use spendguard_core::engine::AnalysisEngine;
use spendguard_core::error::Error as CoreError;

mod handlers;

/// Maximum request body size (1 MB)
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub engine: AnalysisEngine,
}

/// Create the application router
pub fn create_router() -> Router {
    let state = Arc::new(AppState {
        engine: AnalysisEngine::new(),
    });

    Router::new()
        // Liveness
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Analysis
        .route("/analyze", post(handlers::analyze))
        .route("/predict", post(handlers::predict))
        .route("/baseline", post(handlers::baseline))
        // Risk
        .route("/risk", post(handlers::risk))
        .route("/secure-risk", post(handlers::secure_risk))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the server
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let app = create_router();
    let addr = format!("{}:{}", config.host, config.port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unprocessable(msg: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error to the matching HTTP status
    pub fn from_core(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientData { .. } => Self::unprocessable(&err.to_string()),
            _ => Self::bad_request(&err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
