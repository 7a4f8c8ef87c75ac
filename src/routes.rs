//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Health check: database, AI provider (public)
//! - `/api/*`        - Ad generation API, rate limited per client IP
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::RateLimitLayer;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limiter for `/api`; the server must then be run
///   with connect info so the peer address is available
pub fn app_router(state: AppState, rate_limit: RateLimitLayer) -> NormalizePath<Router> {
    let api_router = api::routes::generate_routes().layer(rate_limit);

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
