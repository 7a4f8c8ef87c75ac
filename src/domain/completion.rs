//! Outbound chat-completion capability used to generate ad copy.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::platform::Platform;

/// System and user instructions sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}

/// Sampling settings for a single completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionOptions {
    /// Facebook copy is sampled slightly hotter than Google copy.
    pub fn for_platform(platform: Platform) -> Self {
        let temperature = match platform {
            Platform::Google => 0.7,
            Platform::Facebook => 0.8,
        };
        Self {
            temperature,
            max_tokens: 2000,
        }
    }
}

/// Failures talking to the AI provider.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("OpenAI API key is not configured")]
    NotConfigured,

    #[error("No response from OpenAI")]
    EmptyResponse,

    #[error("OpenAI request timed out after {0}s")]
    Timeout(u64),

    #[error("OpenAI request failed: {0}")]
    Transport(String),

    #[error("OpenAI returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected OpenAI response: {0}")]
    Decode(String),
}

impl AiError {
    /// Whether another attempt could reasonably succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            AiError::Timeout(_) | AiError::Transport(_) => true,
            AiError::Status { status, .. } => *status == 429 || *status >= 500,
            AiError::NotConfigured | AiError::EmptyResponse | AiError::Decode(_) => false,
        }
    }
}

/// A chat-completion provider that answers in JSON.
///
/// # Implementations
///
/// - [`crate::infrastructure::ai::OpenAiClient`] - OpenAI-compatible HTTP API
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Whether credentials are present. No network traffic.
    fn is_configured(&self) -> bool;

    /// Sends one completion request and returns the raw message content.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::NotConfigured`] without credentials,
    /// [`AiError::EmptyResponse`] when the reply has no content, and the
    /// remaining variants on transport or provider failures.
    async fn complete_json(
        &self,
        prompt: &ChatPrompt,
        options: &CompletionOptions,
    ) -> Result<String, AiError>;

    /// Issues a tiny completion to verify credentials and connectivity.
    async fn ping(&self) -> Result<(), AiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_per_platform() {
        assert_eq!(CompletionOptions::for_platform(Platform::Google).temperature, 0.7);
        assert_eq!(CompletionOptions::for_platform(Platform::Facebook).temperature, 0.8);
        assert_eq!(CompletionOptions::for_platform(Platform::Google).max_tokens, 2000);
    }

    #[test]
    fn test_transient_errors() {
        assert!(AiError::Timeout(30).is_transient());
        assert!(AiError::Status { status: 429, body: String::new() }.is_transient());
        assert!(AiError::Status { status: 503, body: String::new() }.is_transient());
        assert!(!AiError::Status { status: 401, body: String::new() }.is_transient());
        assert!(!AiError::NotConfigured.is_transient());
        assert!(!AiError::EmptyResponse.is_transient());
    }
}
