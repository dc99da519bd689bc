//! Search provider trait

use crate::error::SearchError;
use async_trait::async_trait;
use coherent_domain::EvidenceItem;

/// A source of evidence for a question
///
/// Implementations catch their own transport errors and report them as
/// [`SearchError`]; the retriever decides what a failure means for the chain.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Whether the provider can be called at all (e.g. has credentials)
    fn is_available(&self) -> bool {
        true
    }

    /// Whether results come from a real search backend
    fn is_live(&self) -> bool {
        true
    }

    /// Retrieve evidence for `question`, best match first
    async fn search(&self, question: &str) -> Result<Vec<EvidenceItem>, SearchError>;
}
