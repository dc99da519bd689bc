//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::record::{QueryId, QueryRecord};
use async_trait::async_trait;

/// Sampling controls for a single model call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    /// Sampling temperature; lower favors determinism
    pub temperature: f32,

    /// Ceiling on generated tokens
    pub max_tokens: u32,
}

impl GenerationOptions {
    /// Create generation options
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// Trait for language model operations
///
/// Implemented by the infrastructure layer (coherent-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::fmt::Display + Send;

    /// Generate a free-text completion
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String, Self::Error>;

    /// Generate a completion constrained to a single JSON object
    async fn generate_structured(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, Self::Error>;

    /// Whether the provider has what it needs to reach its backend
    fn is_configured(&self) -> bool {
        true
    }
}

/// Append-only log of completed queries
///
/// Implemented by the infrastructure layer (coherent-store). Writes must
/// keep the id space unique and the recency ordering consistent under
/// concurrent callers.
pub trait QueryStore: Send + Sync {
    /// Error type for store operations
    type Error: std::fmt::Display + Send;

    /// Persist a record and return its id
    fn save(&self, record: QueryRecord) -> Result<QueryId, Self::Error>;

    /// Most recent records first, at most `limit` of them
    fn list_recent(&self, limit: usize) -> Result<Vec<QueryRecord>, Self::Error>;

    /// Look up a record by id
    fn get_by_id(&self, id: &QueryId) -> Result<Option<QueryRecord>, Self::Error>;

    /// Number of stored records
    fn len(&self) -> Result<usize, Self::Error>;

    /// Whether the store holds no records
    fn is_empty(&self) -> Result<bool, Self::Error> {
        Ok(self.len()? == 0)
    }
}
