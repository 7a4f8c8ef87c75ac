//! Chat-completion client for OpenAI-compatible APIs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::completion::{AiError, ChatPrompt, CompletionClient, CompletionOptions};

/// Largest provider error body kept in an [`AiError::Status`].
const MAX_ERROR_BODY: usize = 500;
const EMPTY_ERROR_BODY: &str = "<empty response body>";
const UNREADABLE_ERROR_BODY: &str = "<unreadable response body>";

/// Connection settings for an OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// `None` or empty leaves the client unconfigured; calls then fail with
    /// [`AiError::NotConfigured`] instead of reaching the network.
    pub api_key: Option<String>,
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    pub model: String,
    /// Bound on each outbound request, connection included.
    pub timeout_seconds: u64,
    /// Extra attempts after a transient failure. Zero means a single attempt.
    pub max_retries: usize,
}

/// [`CompletionClient`] speaking the OpenAI `/chat/completions` protocol.
pub struct OpenAiClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl ResponseFormat {
    fn json_object() -> Self {
        Self {
            kind: "json_object",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    /// Creates a client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Transport`] if the HTTP client cannot be built.
    pub fn new(mut config: OpenAiConfig) -> Result<Self, AiError> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AiError::Transport(format!("HTTP client error: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn api_key(&self) -> Result<&str, AiError> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(AiError::NotConfigured)
    }

    /// Sends a request, retrying transient failures up to `max_retries` times.
    async fn send(&self, request: &ChatCompletionRequest<'_>) -> Result<String, AiError> {
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(250)
            .max_delay(Duration::from_secs(8))
            .map(jitter)
            .take(self.config.max_retries);

        RetryIf::spawn(
            strategy,
            || self.send_once(request),
            |e: &AiError| {
                let retry = e.is_transient();
                if retry {
                    tracing::warn!(error = %e, "Retrying AI request");
                }
                retry
            },
        )
        .await
    }

    async fn send_once(&self, request: &ChatCompletionRequest<'_>) -> Result<String, AiError> {
        let api_key = self.api_key()?;
        let url = format!("{}/chat/completions", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::Status {
                status: status.as_u16(),
                body: error_body(response.text().await),
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AiError::EmptyResponse)
    }

    fn map_transport_error(&self, e: reqwest::Error) -> AiError {
        if e.is_timeout() {
            AiError::Timeout(self.config.timeout_seconds)
        } else if e.is_decode() {
            AiError::Decode(e.to_string())
        } else {
            AiError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn is_configured(&self) -> bool {
        self.api_key().is_ok()
    }

    async fn complete_json(
        &self,
        prompt: &ChatPrompt,
        options: &CompletionOptions,
    ) -> Result<String, AiError> {
        self.api_key()?;

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: Some(options.temperature),
            max_tokens: options.max_tokens,
            response_format: ResponseFormat::json_object(),
        };

        tracing::debug!(model = %self.config.model, "Sending completion request");
        self.send(&request).await
    }

    async fn ping(&self) -> Result<(), AiError> {
        self.api_key()?;

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: "Say \"test\" in JSON format",
            }],
            temperature: None,
            max_tokens: 50,
            response_format: ResponseFormat::json_object(),
        };

        self.send_once(&request).await.map(|_| ())
    }
}

/// Reason reported for a non-2xx reply, truncated to [`MAX_ERROR_BODY`] bytes.
fn error_body<E: std::fmt::Display>(text: Result<String, E>) -> String {
    let mut body = match text {
        Ok(body) if !body.trim().is_empty() => body,
        Ok(_) => return EMPTY_ERROR_BODY.to_string(),
        Err(e) => {
            tracing::debug!(error = %e, "Failed to read AI error response body");
            return UNREADABLE_ERROR_BODY.to_string();
        }
    };

    if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        body.truncate(cut);
    }
    body
}
