//! Coherent Search Retrieval
//!
//! Produces ranked evidence for a question with a three-stage fallback
//! chain and attaches a credibility tier to every item.
//!
//! # Architecture
//!
//! ```text
//! question → Google Custom Search ─(4xx / API key)→ DuckDuckGo → synthetic evidence
//! ```
//!
//! Without both Google credentials the chain goes straight to synthetic
//! evidence, so retrieval works offline and never returns fewer than two
//! items on that path.
//!
//! # Example Usage
//!
//! ```no_run
//! use coherent_search::{Retriever, SearchConfig, SearchCredentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let retriever = Retriever::standard(&SearchConfig::default(), SearchCredentials::from_env())?;
//! let evidence = retriever.retrieve("does coffee raise blood pressure").await?;
//! println!("{} evidence items", evidence.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod duckduckgo;
mod error;
mod google;
mod provider;
pub mod recency;
mod retriever;
mod synthetic;

pub use config::{SearchConfig, SearchCredentials, DEFAULT_DUCKDUCKGO_ENDPOINT, DEFAULT_GOOGLE_ENDPOINT};
pub use duckduckgo::DuckDuckGoProvider;
pub use error::SearchError;
pub use google::GoogleSearchProvider;
pub use provider::SearchProvider;
pub use retriever::{Admission, OnFailure, Retriever, Stage};
pub use synthetic::{SyntheticEvidence, PLACEHOLDER_RECENCY};
