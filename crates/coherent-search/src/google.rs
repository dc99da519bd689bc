//! Primary provider: Google Custom Search JSON API

use crate::config::{SearchConfig, SearchCredentials};
use crate::error::SearchError;
use crate::provider::SearchProvider;
use crate::recency::label_from_timestamp;
use async_trait::async_trait;
use chrono::Utc;
use coherent_domain::{classify, EvidenceItem};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error, info};

/// Metatag carrying the article publication time
const PUBLISHED_TIME_TAG: &str = "article:published_time";

/// Keyed web search against a Google Programmable Search Engine
pub struct GoogleSearchProvider {
    endpoint: String,
    credentials: SearchCredentials,
    result_limit: u32,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GoogleSearchResponse {
    #[serde(default)]
    items: Vec<GoogleSearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleSearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    display_link: String,
    #[serde(default)]
    pagemap: Option<PageMap>,
}

#[derive(Debug, Deserialize)]
struct PageMap {
    #[serde(default)]
    metatags: Vec<HashMap<String, Value>>,
}

impl GoogleSearchItem {
    fn published_time(&self) -> Option<&str> {
        self.pagemap
            .as_ref()?
            .metatags
            .first()?
            .get(PUBLISHED_TIME_TAG)?
            .as_str()
    }

    fn into_evidence(self) -> EvidenceItem {
        let published_recency = self
            .published_time()
            .and_then(|raw| label_from_timestamp(raw, Utc::now()));
        let tier = classify(&self.display_link);

        EvidenceItem::new(
            self.title,
            self.snippet,
            self.link,
            self.display_link,
            tier,
            published_recency,
        )
    }
}

impl GoogleSearchProvider {
    /// Create a new provider
    pub fn new(config: &SearchConfig, credentials: SearchCredentials) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SearchError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            credentials,
            result_limit: config.result_limit,
            client,
        })
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
    fn name(&self) -> &str {
        "google"
    }

    fn is_available(&self) -> bool {
        self.credentials.is_complete()
    }

    async fn search(&self, question: &str) -> Result<Vec<EvidenceItem>, SearchError> {
        let (Some(api_key), Some(engine_id)) = (
            self.credentials.api_key.as_deref(),
            self.credentials.engine_id.as_deref(),
        ) else {
            return Err(SearchError::Unavailable("credentials not configured".to_string()));
        };

        info!("Performing Google search for: \"{}\"", question);

        let num = self.result_limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", api_key),
                ("cx", engine_id),
                ("q", question),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(SearchError::communication)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Google search API error: {}", body);
            return Err(SearchError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let data: GoogleSearchResponse = response
            .json()
            .await
            .map_err(SearchError::invalid_response)?;

        debug!("Google search returned {} items", data.items.len());

        Ok(data.items.into_iter().map(GoogleSearchItem::into_evidence).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coherent_domain::CredibilityTier;

    #[test]
    fn test_item_conversion_classifies_display_link() {
        let item: GoogleSearchItem = serde_json::from_value(serde_json::json!({
            "title": "Caffeine: How does it affect blood pressure?",
            "snippet": "Caffeine may cause a short, but dramatic increase.",
            "link": "https://www.mayoclinic.org/faq",
            "displayLink": "www.mayoclinic.org",
        }))
        .unwrap();

        let evidence = item.into_evidence();
        assert_eq!(evidence.source_domain, "www.mayoclinic.org");
        assert_eq!(evidence.credibility_tier, CredibilityTier::High);
        assert_eq!(evidence.published_recency, None);
    }

    #[test]
    fn test_item_conversion_reads_published_time() {
        let published = (Utc::now() - chrono::Duration::days(3)).to_rfc3339();
        let item: GoogleSearchItem = serde_json::from_value(serde_json::json!({
            "title": "t",
            "snippet": "s",
            "link": "https://blog.example.net/post",
            "displayLink": "blog.example.net",
            "pagemap": { "metatags": [ { "article:published_time": published, "og:site_name": "Blog" } ] }
        }))
        .unwrap();

        let evidence = item.into_evidence();
        assert_eq!(evidence.credibility_tier, CredibilityTier::Low);
        assert_eq!(evidence.published_recency.as_deref(), Some("3 days ago"));
    }

    #[test]
    fn test_bad_published_time_yields_no_label() {
        let item: GoogleSearchItem = serde_json::from_value(serde_json::json!({
            "title": "t",
            "link": "https://x.org",
            "displayLink": "x.org",
            "pagemap": { "metatags": [ { "article:published_time": "yesterday-ish" } ] }
        }))
        .unwrap();

        assert_eq!(item.into_evidence().published_recency, None);
    }

    #[test]
    fn test_missing_items_is_empty() {
        let data: GoogleSearchResponse =
            serde_json::from_str(r#"{"searchInformation": {"totalResults": "0"}}"#).unwrap();
        assert!(data.items.is_empty());
    }

    #[test]
    fn test_unavailable_without_credentials() {
        let provider =
            GoogleSearchProvider::new(&SearchConfig::default(), SearchCredentials::default()).unwrap();
        assert!(!provider.is_available());
    }
}
