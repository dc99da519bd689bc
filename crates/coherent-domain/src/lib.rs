//! Coherent Domain Layer
//!
//! Core data model and pure decision logic for the question-answering
//! pipeline. Everything in this crate is deterministic and free of I/O;
//! network-facing collaborators are described by the traits in [`traits`]
//! and implemented in other crates.
//!
//! ## Key Concepts
//!
//! - **Evidence item**: one retrieved source with a credibility tier
//! - **Credibility tier**: coarse trust classification of a source domain
//! - **Analysis result**: the single best answer produced by synthesis
//! - **Query record**: the persisted outcome of one answered question
//! - **Confidence**: an integer score that is always within [0, 100]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod confidence;
pub mod credibility;
pub mod evidence;
pub mod language;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use analysis::AnalysisResult;
pub use confidence::Confidence;
pub use credibility::classify;
pub use evidence::{CredibilityTier, EvidenceItem};
pub use language::{detect_fallback, UNKNOWN_LANGUAGE};
pub use record::{QueryId, QueryRecord};
pub use traits::{GenerationOptions, LlmProvider, QueryStore};
