//! Core Synthesizer implementation

use crate::config::SynthesisConfig;
use crate::error::SynthesizerError;
use crate::fallback;
use crate::parser::{parse_synthesis_response, ParsedAnswer};
use crate::prompt::PromptBuilder;
use coherent_domain::{AnalysisResult, EvidenceItem, LlmProvider};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Produces one best answer from a question and its evidence
pub struct Synthesizer<L: LlmProvider> {
    llm: Arc<L>,
    config: SynthesisConfig,
}

impl<L: LlmProvider> Synthesizer<L> {
    /// Create a synthesizer sharing `llm` with the rest of the pipeline
    pub fn new(llm: Arc<L>, config: SynthesisConfig) -> Self {
        Self { llm, config }
    }

    /// Synthesize an answer
    ///
    /// Any failure on the model path (unconfigured, network, malformed
    /// output) is answered by the rule-based analysis, so the only error
    /// is being called without evidence.
    pub async fn synthesize(
        &self,
        question: &str,
        evidence: &[EvidenceItem],
    ) -> Result<AnalysisResult, SynthesizerError> {
        if evidence.is_empty() {
            return Err(SynthesizerError::EmptyEvidence);
        }

        let start = Instant::now();

        let result = match self.analyze_with_model(question, evidence).await {
            Ok(parsed) => AnalysisResult::new(
                parsed.best_answer,
                parsed.justification,
                parsed.confidence,
                parsed.language,
                elapsed_ms(start),
            ),
            Err(e) => {
                warn!("Model analysis failed, using rule-based analysis: {}", e);
                let answer = fallback::analyze(question, evidence);
                debug!("Rule-based analysis matched rule {:?}", answer.rule);
                AnalysisResult::new(
                    answer.best_answer,
                    answer.justification,
                    answer.confidence,
                    answer.language,
                    elapsed_ms(start),
                )
            }
        };

        info!(
            "Synthesized answer from {} evidence items in {}ms (confidence {})",
            evidence.len(),
            result.latency_ms,
            result.confidence
        );

        Ok(result)
    }

    async fn analyze_with_model(
        &self,
        question: &str,
        evidence: &[EvidenceItem],
    ) -> Result<ParsedAnswer, SynthesizerError> {
        if !self.llm.is_configured() {
            return Err(SynthesizerError::Llm("language model not configured".to_string()));
        }

        let prompt = PromptBuilder::new(question, evidence).build();
        debug!("Prompt length: {} chars", prompt.len());

        let response = self
            .llm
            .generate_structured(&prompt, self.config.synthesis_options())
            .await
            .map_err(|e| SynthesizerError::Llm(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());

        parse_synthesis_response(&response)
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coherent_domain::{CredibilityTier, GenerationOptions};
    use coherent_llm::MockProvider;

    fn evidence() -> Vec<EvidenceItem> {
        vec![EvidenceItem::new(
            "Caffeine and blood pressure",
            "Caffeine may cause a short increase.",
            "https://www.mayoclinic.org/caffeine",
            "mayoclinic.org",
            CredibilityTier::High,
            None,
        )]
    }

    fn synthesizer(provider: MockProvider) -> Synthesizer<MockProvider> {
        Synthesizer::new(Arc::new(provider), SynthesisConfig::default())
    }

    #[tokio::test]
    async fn test_model_answer_is_used() {
        let provider = MockProvider::new(
            r#"{"bestAnswer": "Briefly, yes.", "sourceReasoning": "Medical source.", "confidenceLevel": 140, "language": "en"}"#,
        );
        let synth = synthesizer(provider.clone());

        let result = synth.synthesize("does coffee raise blood pressure", &evidence()).await.unwrap();
        assert_eq!(result.best_answer, "Briefly, yes.");
        assert_eq!(result.justification, "Medical source.");
        assert_eq!(result.confidence.value(), 100);
        assert_eq!(result.language_guess, "en");
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.last_options(), Some(GenerationOptions::new(0.3, 512)));
    }

    #[tokio::test]
    async fn test_model_without_language_reports_unknown() {
        let synth = synthesizer(MockProvider::new(r#"{"bestAnswer": "Yes."}"#));
        let result = synth.synthesize("q", &evidence()).await.unwrap();
        assert_eq!(result.language_guess, "unknown");
        assert_eq!(result.confidence.value(), 0);
    }

    #[tokio::test]
    async fn test_model_error_uses_rules() {
        let mut provider = MockProvider::default();
        provider.add_error("Search Results:");

        let result = synthesizer(provider)
            .synthesize("does coffee raise blood pressure", &evidence())
            .await
            .unwrap();
        assert_eq!(result.confidence.value(), 87);
        assert_eq!(result.language_guess, "en");
    }

    #[tokio::test]
    async fn test_malformed_output_uses_rules() {
        let result = synthesizer(MockProvider::new("I think the answer is yes"))
            .synthesize("what is ai", &evidence())
            .await
            .unwrap();
        assert_eq!(result.confidence.value(), 92);
    }

    #[tokio::test]
    async fn test_unconfigured_model_is_not_called() {
        let provider = MockProvider::unavailable();
        let result = synthesizer(provider.clone())
            .synthesize("how deep is the ocean", &evidence())
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 0);
        assert_eq!(result.confidence.value(), 95);
    }

    #[tokio::test]
    async fn test_empty_evidence_is_an_error() {
        let result = synthesizer(MockProvider::default()).synthesize("q", &[]).await;
        assert!(matches!(result, Err(SynthesizerError::EmptyEvidence)));
    }
}
