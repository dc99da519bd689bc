//! Secondary provider: DuckDuckGo instant answers (no API key required)

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::provider::SearchProvider;
use async_trait::async_trait;
use coherent_domain::{classify, EvidenceItem};
use serde_json::Value;
use tracing::{debug, info};

const MAX_TITLE_CHARS: usize = 80;

/// Keyless search via the DuckDuckGo instant answer API
pub struct DuckDuckGoProvider {
    endpoint: String,
    result_limit: usize,
    client: reqwest::Client,
}

impl DuckDuckGoProvider {
    /// Create a new provider
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("coherent/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.fallback_endpoint.clone(),
            result_limit: config.result_limit as usize,
            client,
        })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(&self, question: &str) -> Result<Vec<EvidenceItem>, SearchError> {
        info!("Performing alternative search for: \"{}\"", question);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", question),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(SearchError::communication)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(SearchError::invalid_response)?;

        let results = parse_instant_answer(&body, self.result_limit);
        if results.is_empty() {
            return Err(SearchError::NoResults(self.name().to_string()));
        }

        debug!("Alternative search returned {} results", results.len());
        Ok(results)
    }
}

/// Turn an instant answer payload into evidence items
///
/// The abstract comes first, then `Results`, then `RelatedTopics`
/// (including topics nested one level under a category).
fn parse_instant_answer(body: &Value, limit: usize) -> Vec<EvidenceItem> {
    let mut results = Vec::new();

    if let Some(abstract_text) = body.get("AbstractText").and_then(Value::as_str) {
        let url = body.get("AbstractURL").and_then(Value::as_str).unwrap_or("");
        if !abstract_text.is_empty() && !url.is_empty() {
            let title = body
                .get("Heading")
                .and_then(Value::as_str)
                .filter(|h| !h.is_empty())
                .map(String::from)
                .unwrap_or_else(|| title_from_text(abstract_text));
            results.push(evidence_from(title, abstract_text, url));
        }
    }

    let topics = body
        .get("Results")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .chain(
            body.get("RelatedTopics")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
                .flat_map(|topic| match topic.get("Topics").and_then(Value::as_array) {
                    Some(nested) => nested.iter().collect::<Vec<_>>(),
                    None => vec![topic],
                }),
        );

    for topic in topics {
        if results.len() >= limit {
            break;
        }
        let text = topic.get("Text").and_then(Value::as_str).unwrap_or("");
        let url = topic.get("FirstURL").and_then(Value::as_str).unwrap_or("");
        if text.is_empty() || url.is_empty() {
            continue;
        }
        results.push(evidence_from(title_from_text(text), text, url));
    }

    results.truncate(limit);
    results
}

fn evidence_from(title: String, snippet: &str, url: &str) -> EvidenceItem {
    let domain = host_of(url);
    let tier = classify(&domain);
    EvidenceItem::new(title, snippet, url, domain, tier, None)
}

fn host_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_default()
}

fn title_from_text(text: &str) -> String {
    match text.split_once(" - ") {
        Some((head, _)) if !head.trim().is_empty() => head.trim().to_string(),
        _ => text.chars().take(MAX_TITLE_CHARS).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coherent_domain::CredibilityTier;
    use serde_json::json;

    #[test]
    fn test_parse_abstract_and_topics() {
        let body = json!({
            "Heading": "Caffeine",
            "AbstractText": "Caffeine is a central nervous system stimulant.",
            "AbstractURL": "https://en.wikipedia.org/wiki/Caffeine",
            "Results": [],
            "RelatedTopics": [
                { "Text": "Coffee - A brewed drink prepared from roasted beans.", "FirstURL": "https://duckduckgo.com/Coffee" },
                { "Name": "In medicine", "Topics": [
                    { "Text": "Hypertension - Long-term high blood pressure.", "FirstURL": "https://www.nih.gov/hypertension" }
                ]},
                { "Text": "", "FirstURL": "https://duckduckgo.com/empty" }
            ]
        });

        let items = parse_instant_answer(&body, 8);
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].title, "Caffeine");
        assert_eq!(items[0].source_domain, "en.wikipedia.org");
        assert_eq!(items[0].credibility_tier, CredibilityTier::Medium);

        assert_eq!(items[1].title, "Coffee");
        assert_eq!(items[1].source_domain, "duckduckgo.com");
        assert_eq!(items[1].credibility_tier, CredibilityTier::Low);

        assert_eq!(items[2].title, "Hypertension");
        assert_eq!(items[2].source_domain, "nih.gov");
        assert_eq!(items[2].credibility_tier, CredibilityTier::High);
    }

    #[test]
    fn test_parse_respects_limit() {
        let topics: Vec<_> = (0..20)
            .map(|i| json!({ "Text": format!("Topic {} - text", i), "FirstURL": format!("https://duckduckgo.com/{}", i) }))
            .collect();
        let body = json!({ "AbstractText": "", "RelatedTopics": topics });

        assert_eq!(parse_instant_answer(&body, 5).len(), 5);
    }

    #[test]
    fn test_parse_empty_payload() {
        assert!(parse_instant_answer(&json!({}), 8).is_empty());
    }

    #[test]
    fn test_title_from_text_without_separator() {
        let text = "x".repeat(200);
        assert_eq!(title_from_text(&text).len(), MAX_TITLE_CHARS);
    }
}
