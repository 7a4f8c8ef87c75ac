//! API route configuration.

use crate::api::handlers::{generate_facebook_handler, generate_google_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Ad generation routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /generate/google`   - Google Search ad copy, compliance-filtered
/// - `POST /generate/facebook` - Facebook/Instagram ad copy for an objective
pub fn generate_routes() -> Router<AppState> {
    Router::new()
        .route("/generate/google", post(generate_google_handler))
        .route("/generate/facebook", post(generate_facebook_handler))
}
