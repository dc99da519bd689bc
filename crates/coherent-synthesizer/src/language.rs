//! Language detection backed by the language model

use crate::config::SynthesisConfig;
use crate::parser::parse_language_code;
use crate::prompt::detection_prompt;
use coherent_domain::language::is_unresolved;
use coherent_domain::{detect_fallback, GenerationOptions, LlmProvider, UNKNOWN_LANGUAGE};
use std::sync::Arc;
use tracing::{debug, warn};

/// Best-effort mapping from free text to a language code
pub struct LanguageDetector<L: LlmProvider> {
    llm: Arc<L>,
    options: GenerationOptions,
}

impl<L: LlmProvider> LanguageDetector<L> {
    /// Create a detector sharing `llm` with the rest of the pipeline
    pub fn new(llm: Arc<L>, config: &SynthesisConfig) -> Self {
        Self {
            llm,
            options: config.detection_options(),
        }
    }

    /// Ask the model for a bare language code
    ///
    /// Returns "unknown" when the model is not configured, fails or
    /// answers with nothing.
    pub async fn detect(&self, text: &str) -> String {
        if !self.llm.is_configured() {
            debug!("Language model not configured, skipping detection");
            return UNKNOWN_LANGUAGE.to_string();
        }

        match self.llm.generate(&detection_prompt(text), self.options).await {
            Ok(response) => {
                parse_language_code(&response).unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())
            }
            Err(e) => {
                warn!("Language detection failed: {}", e);
                UNKNOWN_LANGUAGE.to_string()
            }
        }
    }

    /// Detect, then fall back to script matching if the model gave no answer
    pub async fn resolve(&self, text: &str) -> String {
        let detected = self.detect(text).await;
        if is_unresolved(&detected) {
            detect_fallback(text).to_string()
        } else {
            detected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coherent_llm::MockProvider;

    fn detector(provider: MockProvider) -> LanguageDetector<MockProvider> {
        LanguageDetector::new(Arc::new(provider), &SynthesisConfig::default())
    }

    #[tokio::test]
    async fn test_detect_trims_model_output() {
        let provider = MockProvider::new("  es\n");
        let detector = detector(provider.clone());

        assert_eq!(detector.detect("hola").await, "es");
        assert_eq!(provider.last_options(), Some(GenerationOptions::new(0.0, 10)));
    }

    #[tokio::test]
    async fn test_detect_failure_is_unknown() {
        let mut provider = MockProvider::new("en");
        provider.add_error("Detect the language");

        assert_eq!(detector(provider).detect("hello").await, "unknown");
    }

    #[tokio::test]
    async fn test_unconfigured_model_is_not_called() {
        let provider = MockProvider::unavailable();
        let detector = detector(provider.clone());

        assert_eq!(detector.detect("hello").await, "unknown");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_script() {
        let offline = detector(MockProvider::unavailable());
        assert_eq!(offline.resolve("مرحبا").await, "ar");
        assert_eq!(offline.resolve("hello").await, "en");

        let undecided = detector_with("unknown");
        assert_eq!(undecided.resolve("你好").await, "zh");
    }

    #[tokio::test]
    async fn test_resolve_prefers_model_answer() {
        assert_eq!(detector_with("fr").resolve("bonjour").await, "fr");
    }

    fn detector_with(response: &str) -> LanguageDetector<MockProvider> {
        detector(MockProvider::new(response))
    }
}
