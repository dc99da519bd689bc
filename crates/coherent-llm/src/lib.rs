//! Coherent LLM Provider Layer
//!
//! Pluggable language-model implementations of the `LlmProvider` trait from
//! `coherent-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions endpoint
//!
//! # Examples
//!
//! ```
//! use coherent_llm::MockProvider;
//! use coherent_domain::{GenerationOptions, LlmProvider};
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let result = rt.block_on(provider.generate("test prompt", GenerationOptions::new(0.0, 10)));
//! assert_eq!(result.unwrap(), "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use coherent_domain::{GenerationOptions, LlmProvider};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error (including timeouts)
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// No API key configured
    #[error("LLM provider not configured: {0}")]
    NotConfigured(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Marker stored in the response table to make a prompt fail
const ERROR_MARKER: &str = "\u{0}ERROR";

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Responses are keyed by a substring of the prompt, so tests can target
/// the synthesis prompt and the detection prompt separately.
///
/// # Examples
///
/// ```
/// use coherent_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("Detect the language", "en");
/// provider.add_error("Search Results:");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Option<String>,
    responses: Arc<Mutex<Vec<(String, String)>>>,
    call_count: Arc<Mutex<usize>>,
    last_options: Arc<Mutex<Option<GenerationOptions>>>,
    configured: bool,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Some(response.into()),
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_options: Arc::new(Mutex::new(None)),
            configured: true,
        }
    }

    /// Create a provider that fails every call, like an unreachable backend
    pub fn unavailable() -> Self {
        Self {
            default_response: None,
            configured: false,
            ..Self::new("")
        }
    }

    /// Respond with `response` whenever the prompt contains `prompt_fragment`
    ///
    /// Fragments are checked in insertion order; the first match wins.
    pub fn add_response(&mut self, prompt_fragment: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).push((prompt_fragment.into(), response.into()));
    }

    /// Fail whenever the prompt contains `prompt_fragment`
    pub fn add_error(&mut self, prompt_fragment: impl Into<String>) {
        lock(&self.responses).push((prompt_fragment.into(), ERROR_MARKER.to_string()));
    }

    /// Get the number of times a generate method was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// Options passed to the most recent call
    pub fn last_options(&self) -> Option<GenerationOptions> {
        *lock(&self.last_options)
    }

    fn respond(&self, prompt: &str, options: GenerationOptions) -> Result<String, LlmError> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_options) = Some(options);

        let matched = lock(&self.responses)
            .iter()
            .find(|(fragment, _)| prompt.contains(fragment.as_str()))
            .map(|(_, response)| response.clone());

        match matched {
            Some(response) if response == ERROR_MARKER => {
                Err(LlmError::Other("Mock error".to_string()))
            }
            Some(response) => Ok(response),
            None => self
                .default_response
                .clone()
                .ok_or_else(|| LlmError::NotConfigured("mock provider is unavailable".to_string())),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String, Self::Error> {
        self.respond(prompt, options)
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, Self::Error> {
        self.respond(prompt, options)
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
