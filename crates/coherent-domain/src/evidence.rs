//! Evidence module - retrieved sources and their trust tiers

use serde::{Deserialize, Serialize};

/// Credibility tier assigned to a source domain
///
/// Tiers are coarse on purpose: they feed the synthesis prompt and the
/// rule-based confidence formula, neither of which needs finer grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredibilityTier {
    /// Government bodies, universities, journals, major wire services
    High,

    /// Encyclopedias, business and tech press
    Medium,

    /// Everything else
    Low,
}

impl CredibilityTier {
    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CredibilityTier::High => "high",
            CredibilityTier::Medium => "medium",
            CredibilityTier::Low => "low",
        }
    }

    /// Parse a tier from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" => Some(CredibilityTier::High),
            "medium" => Some(CredibilityTier::Medium),
            "low" => Some(CredibilityTier::Low),
            _ => None,
        }
    }
}

impl std::str::FromStr for CredibilityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid credibility tier: {}", s))
    }
}

impl std::fmt::Display for CredibilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One retrieved candidate source
///
/// Evidence items are immutable once constructed. Only the search retriever
/// produces them; synthesis and persistence read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceItem {
    /// Page title
    pub title: String,

    /// Short excerpt shown by the search provider
    pub snippet: String,

    /// Link to the page
    pub url: String,

    /// Display domain of the source (e.g. "mayoclinic.org")
    pub source_domain: String,

    /// Trust tier of the source domain
    pub credibility_tier: CredibilityTier,

    /// Human-readable relative age ("3 days ago"), if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_recency: Option<String>,
}

impl EvidenceItem {
    /// Create a new evidence item
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        url: impl Into<String>,
        source_domain: impl Into<String>,
        credibility_tier: CredibilityTier,
        published_recency: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            url: url.into(),
            source_domain: source_domain.into(),
            credibility_tier,
            published_recency,
        }
    }

    /// Whether this item comes from a high-credibility source
    pub fn is_high_credibility(&self) -> bool {
        self.credibility_tier == CredibilityTier::High
    }
}
