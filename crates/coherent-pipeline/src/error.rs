//! Error types for the pipeline

use std::fmt;
use thiserror::Error;

/// Failures that end a pipeline run
///
/// Everything the components can absorb with a fallback is absorbed; these
/// are the cases that reach the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Empty or whitespace-only question
    #[error("Question must not be empty")]
    InvalidInput,

    /// Retrieval produced no evidence
    #[error("No search results found")]
    NoEvidence,

    /// A search provider failed in a way retrieval could not fall back from
    #[error("Search failed: {0}")]
    RetrievalFailure(String),

    /// Synthesis failed despite its rule-based fallback
    #[error("Answer synthesis failed: {0}")]
    SynthesisFailure(String),

    /// The completed record could not be stored
    #[error("Failed to store query: {0}")]
    Persistence(String),
}

/// Coarse category of a [`PipelineError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`PipelineError::InvalidInput`]
    InvalidInput,
    /// See [`PipelineError::NoEvidence`]
    NoEvidence,
    /// See [`PipelineError::RetrievalFailure`]
    RetrievalFailure,
    /// See [`PipelineError::SynthesisFailure`]
    SynthesisFailure,
    /// See [`PipelineError::Persistence`]
    Persistence,
}

impl ErrorKind {
    /// Whether the caller, not the system, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, ErrorKind::InvalidInput | ErrorKind::NoEvidence)
    }

    /// Stable name for logs and responses
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NoEvidence => "no_evidence",
            ErrorKind::RetrievalFailure => "retrieval_failure",
            ErrorKind::SynthesisFailure => "synthesis_failure",
            ErrorKind::Persistence => "persistence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PipelineError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::InvalidInput => ErrorKind::InvalidInput,
            PipelineError::NoEvidence => ErrorKind::NoEvidence,
            PipelineError::RetrievalFailure(_) => ErrorKind::RetrievalFailure,
            PipelineError::SynthesisFailure(_) => ErrorKind::SynthesisFailure,
            PipelineError::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
