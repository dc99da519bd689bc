//! Credibility classification of source domains
//!
//! A total function from a domain string to a [`CredibilityTier`]. Rules are
//! checked in strict priority order and the first match wins:
//!
//! 1. listed high-trust domains
//! 2. listed medium-trust domains
//! 3. institutional markers (`.gov`, `.edu`, `.org`, "medical", "health", "journal")
//! 4. everything else is low

use crate::evidence::CredibilityTier;

/// Domains trusted outright: health bodies, universities, journals, wire services
pub const HIGH_TRUST_DOMAINS: &[&str] = &[
    "mayo.edu",
    "mayoclinic.org",
    "nih.gov",
    "who.int",
    "cdc.gov",
    "harvard.edu",
    "stanford.edu",
    "mit.edu",
    "oxford.ac.uk",
    "cambridge.org",
    "nature.com",
    "science.org",
    "pubmed.ncbi.nlm.nih.gov",
    "webmd.com",
    "healthline.com",
    "medicalnewstoday.com",
    "reuters.com",
    "bbc.com",
    "nytimes.com",
    "washingtonpost.com",
    "theguardian.com",
    "economist.com",
];

/// General encyclopedias, business/tech press and finance media
pub const MEDIUM_TRUST_DOMAINS: &[&str] = &[
    "wikipedia.org",
    "britannica.com",
    "investopedia.com",
    "forbes.com",
    "businessinsider.com",
    "cnbc.com",
    "techcrunch.com",
    "wired.com",
    "atlantic.com",
    "newyorker.com",
    "slate.com",
    "vox.com",
];

/// Substrings that mark an institutional or specialist source
pub const HIGH_TRUST_MARKERS: &[&str] = &[".gov", ".edu", ".org", "medical", "health", "journal"];

/// Classify a source domain into a credibility tier
///
/// Matching is case-insensitive and substring-based, so subdomains and
/// display domains with a `www.` prefix classify like their parent.
///
/// # Examples
///
/// ```
/// use coherent_domain::{classify, CredibilityTier};
///
/// assert_eq!(classify("www.CDC.gov"), CredibilityTier::High);
/// assert_eq!(classify("en.wikipedia.org"), CredibilityTier::Medium);
/// assert_eq!(classify("example.com"), CredibilityTier::Low);
/// ```
pub fn classify(domain: &str) -> CredibilityTier {
    let domain = domain.to_lowercase();

    if HIGH_TRUST_DOMAINS.iter().any(|d| domain.contains(d)) {
        return CredibilityTier::High;
    }

    if MEDIUM_TRUST_DOMAINS.iter().any(|d| domain.contains(d)) {
        return CredibilityTier::Medium;
    }

    if HIGH_TRUST_MARKERS.iter().any(|m| domain.contains(m)) {
        return CredibilityTier::High;
    }

    CredibilityTier::Low
}
