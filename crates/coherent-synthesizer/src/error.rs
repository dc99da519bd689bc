//! Error types for the Synthesizer

use thiserror::Error;

/// Errors that can occur during answer synthesis
///
/// Most of these never leave the crate: the synthesizer answers them with
/// its rule-based analysis. Only `EmptyEvidence` reaches the caller.
#[derive(Error, Debug)]
pub enum SynthesizerError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Synthesis was requested without any evidence
    #[error("Cannot synthesize an answer without evidence")]
    EmptyEvidence,

    /// Model output did not have the expected shape
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for SynthesizerError {
    fn from(e: serde_json::Error) -> Self {
        SynthesizerError::JsonParse(e.to_string())
    }
}
