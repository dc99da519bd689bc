//! Query record module - the persisted outcome of one answered question

use crate::confidence::Confidence;
use crate::evidence::EvidenceItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a query record based on UUIDv7
///
/// UUIDv7 ids sort by creation time and need no coordination between
/// concurrent writers, which keeps the store's id space unique without a
/// shared counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryId(uuid::Uuid);

impl QueryId {
    /// Generate a new UUIDv7-based QueryId
    ///
    /// # Examples
    ///
    /// ```
    /// use coherent_domain::QueryId;
    ///
    /// let a = QueryId::new();
    /// let b = QueryId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Parse a QueryId from its string form
    ///
    /// # Examples
    ///
    /// ```
    /// use coherent_domain::QueryId;
    ///
    /// let id = QueryId::new();
    /// let parsed = QueryId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid query id: {}", e))
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for QueryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for QueryId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// A completed query: question, evidence and the chosen answer
///
/// Created exactly once by the pipeline after synthesis succeeds and owned
/// by the store from then on. There is no update operation. `evidence` is
/// never empty and `language` is always a resolved code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRecord {
    /// Unique identifier
    pub id: QueryId,

    /// The question as submitted
    pub question: String,

    /// Resolved language code of the question
    pub language: String,

    /// Evidence the answer was synthesized from, in retrieval order
    pub evidence: Vec<EvidenceItem>,

    /// The single best answer
    pub best_answer: String,

    /// Why the chosen sources are trustworthy
    pub justification: String,

    /// Confidence score in [0, 100]
    pub confidence: Confidence,

    /// Synthesis latency in milliseconds
    pub latency_ms: u64,

    /// When the record was created (ISO-8601 in JSON)
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::CredibilityTier;

    fn sample_record() -> QueryRecord {
        QueryRecord {
            id: QueryId::new(),
            question: "does coffee raise blood pressure".to_string(),
            language: "en".to_string(),
            evidence: vec![EvidenceItem::new(
                "Coffee and Blood Pressure",
                "Caffeine may cause a short-term increase.",
                "https://www.mayoclinic.org/x",
                "mayoclinic.org",
                CredibilityTier::High,
                Some("2 weeks ago".to_string()),
            )],
            best_answer: "Yes, temporarily.".to_string(),
            justification: "Mayo Clinic".to_string(),
            confidence: Confidence::from_int(87),
            latency_ms: 4,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_query_id_display_is_uuid() {
        let id = QueryId::new();
        let text = id.to_string();
        assert_eq!(text.len(), 36);
        assert_eq!(text.parse::<QueryId>().unwrap(), id);
        assert_eq!(id.as_uuid().get_version_num(), 7);
    }

    #[test]
    fn test_query_id_rejects_garbage() {
        assert!(QueryId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn test_record_json_round_trip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"bestAnswer\""));

        let parsed: QueryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
