//! Coherent Answer Synthesizer
//!
//! Turns a question and its evidence into one best answer, and resolves the
//! language a question is written in.
//!
//! # Architecture
//!
//! ```text
//! question + evidence → PromptBuilder → LLM (JSON mode) → parser → AnalysisResult
//!                                         │ any failure
//!                                         └──→ rule-based analysis → AnalysisResult
//! ```
//!
//! The rule-based path never fails, so once evidence exists synthesis
//! always produces an answer.
//!
//! # Example Usage
//!
//! ```no_run
//! use coherent_synthesizer::{Synthesizer, SynthesisConfig};
//! use coherent_llm::MockProvider;
//! use coherent_domain::{CredibilityTier, EvidenceItem};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = Arc::new(MockProvider::unavailable());
//! let synthesizer = Synthesizer::new(llm, SynthesisConfig::default());
//!
//! let evidence = vec![EvidenceItem::new(
//!     "Caffeine and blood pressure",
//!     "Caffeine may cause a short increase.",
//!     "https://www.mayoclinic.org/caffeine",
//!     "mayoclinic.org",
//!     CredibilityTier::High,
//!     None,
//! )];
//!
//! let result = synthesizer.synthesize("does coffee raise blood pressure", &evidence).await?;
//! println!("{} ({}%)", result.best_answer, result.confidence);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub mod fallback;
mod language;
mod parser;
mod prompt;
mod synthesizer;

pub use config::SynthesisConfig;
pub use error::SynthesizerError;
pub use language::LanguageDetector;
pub use parser::{parse_synthesis_response, ParsedAnswer, NO_ANSWER, NO_REASONING};
pub use prompt::{detection_prompt, PromptBuilder, DETECTION_PREFIX, EVIDENCE_HEADER};
pub use synthesizer::Synthesizer;
