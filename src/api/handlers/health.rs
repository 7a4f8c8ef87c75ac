//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: Runs a trivial query against the client store
/// 2. **AI**: Reports whether a provider key is configured. No request is
///    sent, so the check stays free and fast
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "ai": { "status": "ok", "message": "OpenAI API key configured" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let ai_check = check_ai(&state);

    let all_healthy = db_check.is_ok() && ai_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            ai: ai_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    if state.client_repository.health_check().await {
        CheckStatus::ok("Connected")
    } else {
        CheckStatus::error("Database connection failed")
    }
}

fn check_ai(state: &AppState) -> CheckStatus {
    if state.completion_client.is_configured() {
        CheckStatus::ok("OpenAI API key configured")
    } else {
        CheckStatus::error("OpenAI API key is not configured")
    }
}
