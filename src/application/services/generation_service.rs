//! Ad copy generation service.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::domain::completion::{AiError, CompletionClient, CompletionOptions};
use crate::domain::compliance;
use crate::domain::entities::{GenerationRequest, GenerationResponse, RawAdCopy};
use crate::domain::platform::Platform;
use crate::domain::prompt_builder::build_prompts;
use crate::error::AppError;

/// Message returned when the model's reply is not JSON at all.
pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse AI response. Please try again.";

/// Generates compliance-checked ad copy through the AI provider.
///
/// Each call is one outbound completion followed by synchronous filtering;
/// the service holds no per-request state.
pub struct GenerationService {
    completion_client: Arc<dyn CompletionClient>,
}

impl GenerationService {
    /// Creates a new generation service.
    pub fn new(completion_client: Arc<dyn CompletionClient>) -> Self {
        Self { completion_client }
    }

    /// Generates ad copy for a validated request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if:
    /// - The AI provider has no API key configured
    /// - The provider call fails or returns no content
    /// - The reply is not JSON, or lacks `headlines`/`descriptions` lists
    ///
    /// Compliance violations are never errors; offending entries are
    /// dropped and reported in the response warnings.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, AppError> {
        let platform = request.platform();

        if !self.completion_client.is_configured() {
            record_outcome(platform, "not_configured");
            return Err(AppError::upstream(AiError::NotConfigured.to_string()));
        }

        let prompt = build_prompts(request);
        let options = CompletionOptions::for_platform(platform);
        let started = Instant::now();

        let content = self
            .completion_client
            .complete_json(&prompt, &options)
            .await
            .map_err(|e| {
                record_outcome(platform, "upstream_error");
                match e {
                    AiError::NotConfigured => AppError::upstream(e.to_string()),
                    other => AppError::upstream(format!("{}: {other}", failure_prefix(platform))),
                }
            })?;

        metrics::histogram!("ad_generation_duration_seconds", "platform" => platform.as_str())
            .record(started.elapsed().as_secs_f64());

        let candidate = parse_candidate(platform, &content).inspect_err(|_| {
            record_outcome(platform, "invalid_response");
        })?;

        let candidate_count = candidate.headlines.len() + candidate.descriptions.len();
        let response = compliance::validate(platform, candidate);
        let dropped = candidate_count - response.headlines.len() - response.descriptions.len();

        metrics::counter!("ad_copy_entries_dropped_total", "platform" => platform.as_str())
            .increment(dropped as u64);
        record_outcome(platform, "success");

        tracing::info!(
            platform = %platform,
            headlines = response.headlines.len(),
            descriptions = response.descriptions.len(),
            dropped,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generated ad copy"
        );

        Ok(response)
    }
}

fn failure_prefix(platform: Platform) -> &'static str {
    match platform {
        Platform::Google => "Ad generation failed",
        Platform::Facebook => "Facebook ad generation failed",
    }
}

fn record_outcome(platform: Platform, outcome: &'static str) {
    metrics::counter!(
        "ad_generation_requests_total",
        "platform" => platform.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Reads the model's JSON reply into unchecked candidates.
fn parse_candidate(platform: Platform, content: &str) -> Result<RawAdCopy, AppError> {
    let value: Value = serde_json::from_str(content).map_err(|e| {
        tracing::warn!(error = %e, "AI response is not valid JSON");
        AppError::upstream(PARSE_FAILURE_MESSAGE)
    })?;

    RawAdCopy::from_json_value(&value).ok_or_else(|| {
        AppError::upstream(format!(
            "{}: Invalid response format from OpenAI",
            failure_prefix(platform)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::completion::MockCompletionClient;
    use crate::domain::entities::{CampaignTarget, Objective, Tone};

    fn request(target: CampaignTarget) -> GenerationRequest {
        GenerationRequest {
            business_name: "Acme".to_string(),
            business_description: "We sell widgets".to_string(),
            target_audience: "homeowners".to_string(),
            key_features: vec!["durable".to_string(), "affordable".to_string()],
            call_to_action: "Shop Now".to_string(),
            keywords: vec![],
            tone: Tone::Professional,
            target,
            industry: None,
            client_context: None,
        }
    }

    fn configured_mock() -> MockCompletionClient {
        let mut mock = MockCompletionClient::new();
        mock.expect_is_configured().return_const(true);
        mock
    }

    #[tokio::test]
    async fn test_generate_google_filters_response() {
        let mut mock = configured_mock();
        mock.expect_complete_json()
            .withf(|prompt, options| {
                prompt.system.contains("GOOGLE ADS COMPLIANCE RULES") && options.temperature == 0.7
            })
            .times(1)
            .returning(|_, _| {
                Ok(r#"{
                    "headlines": ["Durable Widgets", "BUY NOW TODAY!!!"],
                    "descriptions": ["Widgets that last for years."],
                    "confidence": 0.9
                }"#
                .to_string())
            });

        let service = GenerationService::new(Arc::new(mock));
        let response = service
            .generate(&request(CampaignTarget::Google))
            .await
            .unwrap();

        assert_eq!(response.headlines, vec!["Durable Widgets"]);
        assert_eq!(response.descriptions, vec!["Widgets that last for years."]);
        assert_eq!(response.confidence, 0.9);
        assert_eq!(
            response.warnings,
            vec!["Headline contains exclamation mark: \"BUY NOW TODAY!!!\""]
        );
    }

    #[tokio::test]
    async fn test_generate_facebook_not_filtered() {
        let mut mock = configured_mock();
        mock.expect_complete_json()
            .withf(|prompt, options| {
                prompt.system.contains("OBJECTIVE: sales") && options.temperature == 0.8
            })
            .times(1)
            .returning(|_, _| {
                Ok(r#"{"headlines": ["LOVE IT!"], "descriptions": ["So good!"]}"#.to_string())
            });

        let service = GenerationService::new(Arc::new(mock));
        let response = service
            .generate(&request(CampaignTarget::Facebook {
                objective: Objective::Sales,
            }))
            .await
            .unwrap();

        assert_eq!(response.headlines, vec!["LOVE IT!"]);
        assert_eq!(response.descriptions, vec!["So good!"]);
        assert_eq!(response.confidence, 0.8);
        assert!(response.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_not_configured() {
        let mut mock = MockCompletionClient::new();
        mock.expect_is_configured().return_const(false);
        mock.expect_complete_json().never();

        let service = GenerationService::new(Arc::new(mock));
        let err = service
            .generate(&request(CampaignTarget::Google))
            .await
            .unwrap_err();

        assert_eq!(err.public_message(), "OpenAI API key is not configured");
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let mut mock = configured_mock();
        mock.expect_complete_json()
            .returning(|_, _| Ok("headlines: nope".to_string()));

        let service = GenerationService::new(Arc::new(mock));
        let err = service
            .generate(&request(CampaignTarget::Google))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)));
        assert_eq!(err.public_message(), PARSE_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_missing_lists() {
        let mut mock = configured_mock();
        mock.expect_complete_json()
            .returning(|_, _| Ok(r#"{"headlines": ["Only headlines"]}"#.to_string()));

        let service = GenerationService::new(Arc::new(mock));
        let err = service
            .generate(&request(CampaignTarget::Facebook {
                objective: Objective::Leads,
            }))
            .await
            .unwrap_err();

        assert_eq!(
            err.public_message(),
            "Facebook ad generation failed: Invalid response format from OpenAI"
        );
    }

    #[tokio::test]
    async fn test_upstream_failure_prefixed() {
        let mut mock = configured_mock();
        mock.expect_complete_json()
            .returning(|_, _| Err(AiError::EmptyResponse));

        let service = GenerationService::new(Arc::new(mock));
        let err = service
            .generate(&request(CampaignTarget::Google))
            .await
            .unwrap_err();

        assert_eq!(
            err.public_message(),
            "Ad generation failed: No response from OpenAI"
        );
    }
}
