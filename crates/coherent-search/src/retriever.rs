//! Evidence retrieval as an ordered chain of providers
//!
//! Each stage declares when it may run and what its failure means:
//!
//! ```text
//! primary (keyed)  ──eligible failure──▶ secondary (keyless) ──any failure──▶ synthetic
//!        │                                                                       ▲
//!        └──────────────── unavailable (no credentials) ────────────────────────┘
//!        └── other failure ──▶ error returned to the caller
//! ```
//!
//! The first stage that returns `Ok` ends the chain, even with an empty list:
//! an empty result from a live provider is a meaningful answer.

use crate::config::{SearchConfig, SearchCredentials};
use crate::duckduckgo::DuckDuckGoProvider;
use crate::error::SearchError;
use crate::google::GoogleSearchProvider;
use crate::provider::SearchProvider;
use crate::synthetic::SyntheticEvidence;
use coherent_domain::EvidenceItem;
use tracing::{info, warn};

/// When a stage is allowed to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Runs whenever the chain reaches it
    Always,
    /// Runs only right after a stage failed with a fallback-eligible error
    AfterEligibleFailure,
}

/// What a stage failure means for the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Continue when the error is fallback-eligible, otherwise stop with it
    FallbackIfEligible,
    /// Always continue to the next stage
    FallThrough,
}

/// One link of the retrieval chain
pub struct Stage {
    provider: Box<dyn SearchProvider>,
    admission: Admission,
    on_failure: OnFailure,
}

impl Stage {
    /// Create a stage that always runs and falls through on any failure
    pub fn new(provider: impl SearchProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            admission: Admission::Always,
            on_failure: OnFailure::FallThrough,
        }
    }

    /// Set the admission rule
    pub fn admit(mut self, admission: Admission) -> Self {
        self.admission = admission;
        self
    }

    /// Set the failure rule
    pub fn on_failure(mut self, on_failure: OnFailure) -> Self {
        self.on_failure = on_failure;
        self
    }

    /// Name of the wrapped provider
    pub fn name(&self) -> &str {
        self.provider.name()
    }
}

/// Produces evidence for a question by walking its stages in order
pub struct Retriever {
    stages: Vec<Stage>,
}

impl Retriever {
    /// Create a retriever from explicit stages
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// The standard chain: Google, then DuckDuckGo, then synthetic evidence
    pub fn standard(config: &SearchConfig, credentials: SearchCredentials) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::Config)?;

        Ok(Self::new(vec![
            Stage::new(GoogleSearchProvider::new(config, credentials)?)
                .on_failure(OnFailure::FallbackIfEligible),
            Stage::new(DuckDuckGoProvider::new(config)?)
                .admit(Admission::AfterEligibleFailure),
            Stage::new(SyntheticEvidence::new()),
        ]))
    }

    /// Whether a live provider is reachable without a prior failure
    pub fn has_live_provider(&self) -> bool {
        self.stages.iter().any(|s| {
            s.admission == Admission::Always && s.provider.is_live() && s.provider.is_available()
        })
    }

    /// Stage names in evaluation order
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Retrieve evidence for `question`
    ///
    /// Returns an empty list only when a live provider legitimately found
    /// nothing or every stage was skipped. Returns an error only for a
    /// failure its stage is not allowed to fall back from.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<EvidenceItem>, SearchError> {
        let mut previous_eligible = false;

        for stage in &self.stages {
            if stage.admission == Admission::AfterEligibleFailure && !previous_eligible {
                continue;
            }
            previous_eligible = false;

            if !stage.provider.is_available() {
                info!("{} search not configured, skipping", stage.name());
                continue;
            }

            match stage.provider.search(question).await {
                Ok(items) => {
                    info!("{} search returned {} results", stage.name(), items.len());
                    return Ok(items);
                }
                Err(e) => {
                    let eligible = e.is_fallback_eligible();
                    match stage.on_failure {
                        OnFailure::FallbackIfEligible if eligible => {
                            warn!("{} search failed with a client error, trying fallback: {}", stage.name(), e);
                            previous_eligible = true;
                        }
                        OnFailure::FallbackIfEligible => {
                            warn!("{} search failed: {}", stage.name(), e);
                            return Err(e);
                        }
                        OnFailure::FallThrough => {
                            warn!("{} search failed, falling through: {}", stage.name(), e);
                        }
                    }
                }
            }
        }

        Ok(Vec::new())
    }
}
