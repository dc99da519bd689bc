//! Coherent Pipeline
//!
//! Sequences the components that answer a question and maps their
//! failures onto a small set of error kinds.
//!
//! # Architecture
//!
//! ```text
//! question → Retriever → Synthesizer → LanguageDetector (if unresolved) → QueryStore
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use coherent_pipeline::Pipeline;
//! use coherent_search::{Retriever, SearchConfig, SearchCredentials};
//! use coherent_synthesizer::SynthesisConfig;
//! use coherent_llm::OpenAiProvider;
//! use coherent_store::MemoryStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let retriever = Retriever::standard(&SearchConfig::default(), SearchCredentials::from_env())?;
//! let llm = Arc::new(OpenAiProvider::default_endpoint(std::env::var("OPENAI_API_KEY").ok())?);
//! let store = Arc::new(MemoryStore::new());
//!
//! let pipeline = Pipeline::new(retriever, llm, store, SynthesisConfig::default());
//! let record = pipeline.run("does coffee raise blood pressure").await?;
//! println!("{} ({}%)", record.best_answer, record.confidence);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod pipeline;
mod stage;

pub use error::{ErrorKind, PipelineError};
pub use pipeline::Pipeline;
pub use stage::Stage;
