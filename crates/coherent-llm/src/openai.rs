//! OpenAI-compatible Provider Implementation
//!
//! Talks to any endpoint that follows the OpenAI chat completions format
//! (OpenAI itself, Azure OpenAI, vLLM, Ollama's `/v1` shim).
//!
//! # Features
//!
//! - Async HTTP communication via `reqwest`
//! - JSON-object response mode for structured output
//! - Per-request timeout so a hung backend cannot stall the caller
//! - Bounded retries with exponential backoff on transient failures
//!
//! # Examples
//!
//! ```no_run
//! use coherent_llm::OpenAiProvider;
//! use std::time::Duration;
//!
//! let provider = OpenAiProvider::new(
//!     "https://api.openai.com/v1",
//!     "gpt-4o",
//!     std::env::var("OPENAI_API_KEY").ok(),
//!     Duration::from_secs(10),
//! ).unwrap();
//! ```

use crate::LlmError;
use async_trait::async_trait;
use coherent_domain::{GenerationOptions, LlmProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default chat completions base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default timeout for LLM requests (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of attempts per call
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Longest wait between two attempts
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Exponential backoff after the `attempt`-th failure: 500ms, 1s, 2s, ...
fn backoff_delay(attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_millis(500u64.saturating_mul(factor)).min(MAX_BACKOFF)
}

/// OpenAI-compatible chat completions provider
pub struct OpenAiProvider {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Response from the chat completions API
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `base_url`: API root (e.g., "https://api.openai.com/v1")
    /// - `model`: Model to use (e.g., "gpt-4o")
    /// - `api_key`: Bearer token; `None` makes every call fail fast with
    ///   [`LlmError::NotConfigured`]
    /// - `timeout`: Request timeout applied to every call
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a provider for the public OpenAI API
    pub fn default_endpoint(api_key: Option<String>) -> Result<Self, LlmError> {
        Self::new(
            DEFAULT_BASE_URL,
            DEFAULT_MODEL,
            api_key,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Set the maximum number of attempts per call (minimum 1)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Model name used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        prompt: &str,
        options: GenerationOptions,
        json_mode: bool,
    ) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::NotConfigured("no API key set".to_string()))?;

        let url = format!("{}/chat/completions", self.base_url);
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: json_mode.then_some(ResponseFormat { kind: "json_object" }),
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .bearer_auth(api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.json::<ChatResponse>().await.map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        })?;
                        return body
                            .choices
                            .into_iter()
                            .next()
                            .and_then(|choice| choice.message.content)
                            .ok_or_else(|| {
                                LlmError::InvalidResponse("Response has no message content".to_string())
                            });
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    }
                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        return Err(LlmError::RateLimitExceeded);
                    }
                    if status.is_client_error() {
                        return Err(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }

                    last_error = Some(LlmError::Communication(format!(
                        "HTTP {}: {}",
                        status, error_text
                    )));
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = backoff_delay(attempts);
                warn!("LLM request attempt {} failed, retrying in {:?}", attempts, delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String, Self::Error> {
        debug!(model = %self.model, prompt_len = prompt.len(), "LLM generate");
        self.complete(prompt, options, false).await
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, Self::Error> {
        debug!(model = %self.model, prompt_len = prompt.len(), "LLM generate (json mode)");
        self.complete(prompt, options, true).await
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
