//! Analysis result module - output of answer synthesis

use crate::confidence::Confidence;
use crate::language::UNKNOWN_LANGUAGE;
use serde::{Deserialize, Serialize};

/// The single best answer produced for a question
///
/// Produced only by the synthesizer. `confidence` is a [`Confidence`], so it
/// is in [0, 100] by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// The answer text, in the language of the question
    pub best_answer: String,

    /// Why the chosen sources are trustworthy
    pub justification: String,

    /// Confidence score
    pub confidence: Confidence,

    /// Language code reported by the synthesizer (may be "unknown")
    pub language_guess: String,

    /// Wall-clock synthesis time in milliseconds
    pub latency_ms: u64,
}

impl AnalysisResult {
    /// Create a new analysis result
    pub fn new(
        best_answer: impl Into<String>,
        justification: impl Into<String>,
        confidence: Confidence,
        language_guess: impl Into<String>,
        latency_ms: u64,
    ) -> Self {
        let language_guess = language_guess.into();
        let language_guess = if language_guess.trim().is_empty() {
            UNKNOWN_LANGUAGE.to_string()
        } else {
            language_guess
        };

        Self {
            best_answer: best_answer.into(),
            justification: justification.into(),
            confidence,
            language_guess,
            latency_ms,
        }
    }
}
