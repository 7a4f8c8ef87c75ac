//! Handlers for the ad copy generation endpoints.

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::api::dto::GenerateAdsRequest;
use crate::domain::entities::GenerationResponse;
use crate::domain::platform::Platform;
use crate::error::AppError;
use crate::state::AppState;

/// Generates compliance-checked Google Search ad copy.
///
/// # Endpoint
///
/// `POST /api/generate/google`
///
/// # Request Body
///
/// ```json
/// {
///   "businessName": "Acme Plumbing",
///   "businessDescription": "24/7 emergency plumbing",
///   "targetAudience": "homeowners in Denver",
///   "keyFeatures": ["Licensed", "Same-day service"],
///   "callToAction": "Call Today",
///   "keywords": ["plumber denver"],
///   "tone": "professional"
/// }
/// ```
///
/// `clientId` / `serviceId` may replace the business fields with a stored
/// client profile.
///
/// # Response
///
/// ```json
/// {
///   "headlines": ["Licensed Denver Plumbers"],
///   "descriptions": ["Same-day service from licensed pros. Call today."],
///   "confidence": 0.85,
///   "warnings": ["Headline contains exclamation mark: \"Call Now!\""]
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` - Missing or invalid fields
/// - `404 Not Found` - Unknown client or service
/// - `500 Internal Server Error` - AI provider failure or unusable reply
pub async fn generate_google_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateAdsRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, AppError> {
    let Json(payload) = payload?;
    generate(&state, Platform::Google, payload).await
}

/// Generates Facebook/Instagram ad copy.
///
/// # Endpoint
///
/// `POST /api/generate/facebook`
///
/// Same body as the Google endpoint plus a required `objective`
/// (`awareness`, `traffic`, `engagement`, `leads`, `sales` or `conversions`).
/// Generated entries are capped at five per list but not filtered.
pub async fn generate_facebook_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateAdsRequest>, JsonRejection>,
) -> Result<Json<GenerationResponse>, AppError> {
    let Json(payload) = payload?;
    generate(&state, Platform::Facebook, payload).await
}

async fn generate(
    state: &AppState,
    platform: Platform,
    mut payload: GenerateAdsRequest,
) -> Result<Json<GenerationResponse>, AppError> {
    payload.normalize();

    let selection = match payload.client_reference()? {
        Some((client_id, service_id)) => {
            Some(state.client_service.resolve(client_id, service_id).await?)
        }
        None => None,
    };

    let request = payload.into_generation_request(platform, selection)?;
    let response = state.generation_service.generate(&request).await?;

    Ok(Json(response))
}
