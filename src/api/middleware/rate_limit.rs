//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Rate limiter applied to the generation endpoints.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a per-IP rate limiter.
///
/// Each client IP starts with `burst` requests; one more is replenished every
/// `period_seconds`. Every generation call costs a paid completion, so the
/// defaults are tight.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the server must be started with connect info.
///
/// # Errors
///
/// Returns an error if either value is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/generate/google", post(generate_google_handler))
///     .layer(rate_limit::layer(2, 20)?);
/// ```
pub fn layer(period_seconds: u64, burst: u32) -> Result<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(period_seconds)
        .burst_size(burst)
        .finish()
        .context("Rate limit values must be greater than 0")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
