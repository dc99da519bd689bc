//! Error types for search retrieval

use thiserror::Error;

/// Errors that can occur while retrieving evidence
#[derive(Error, Debug)]
pub enum SearchError {
    /// Provider answered with a non-success HTTP status
    #[error("Search provider error: HTTP {status}. Details: {body}")]
    Provider {
        /// HTTP status code
        status: u16,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// Network failure or timeout talking to a provider
    #[error("Search request failed: {0}")]
    Communication(String),

    /// Provider response could not be decoded
    #[error("Invalid search response: {0}")]
    InvalidResponse(String),

    /// Provider returned nothing usable
    #[error("No results from {0}")]
    NoResults(String),

    /// Provider lacks credentials or is otherwise unusable
    #[error("Search provider unavailable: {0}")]
    Unavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// Whether this failure looks like a client or credential problem
    ///
    /// Only those failures justify trying the keyless secondary provider.
    /// Timeouts, 5xx responses and other network errors do not.
    pub fn is_fallback_eligible(&self) -> bool {
        match self {
            SearchError::Provider { status, body } => {
                (400..500).contains(status) || reads_as_client_failure(body)
            }
            _ => false,
        }
    }

    /// Transport failure from `reqwest`, with the request URL stripped
    ///
    /// Request URLs carry credentials in their query string.
    pub(crate) fn communication(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return SearchError::Communication("request timed out".to_string());
        }
        SearchError::Communication(e.without_url().to_string())
    }

    /// Undecodable response body, with the request URL stripped
    pub(crate) fn invalid_response(e: reqwest::Error) -> Self {
        SearchError::InvalidResponse(e.without_url().to_string())
    }
}

// Upstream bodies sometimes carry the status only as text
fn reads_as_client_failure(text: &str) -> bool {
    text.contains("400") || text.to_lowercase().contains("api key")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_eligible() {
        for status in [400, 401, 403, 429] {
            let err = SearchError::Provider {
                status,
                body: String::new(),
            };
            assert!(err.is_fallback_eligible(), "status {}", status);
        }
    }

    #[test]
    fn test_api_key_message_is_eligible() {
        let err = SearchError::Provider {
            status: 500,
            body: "API key not valid. Please pass a valid API key.".to_string(),
        };
        assert!(err.is_fallback_eligible());
    }

    #[test]
    fn test_transport_errors_ignore_message_text() {
        assert!(!SearchError::Communication("bad api key".to_string()).is_fallback_eligible());
        assert!(!SearchError::Communication("q=bake+at+400+degrees".to_string()).is_fallback_eligible());
        assert!(!SearchError::InvalidResponse("HTTP 400".to_string()).is_fallback_eligible());
    }

    #[test]
    fn test_server_and_network_errors_are_fatal() {
        let err = SearchError::Provider {
            status: 503,
            body: "backend unavailable".to_string(),
        };
        assert!(!err.is_fallback_eligible());
        assert!(!SearchError::Communication("operation timed out".to_string()).is_fallback_eligible());
        assert!(!SearchError::NoResults("google".to_string()).is_fallback_eligible());
    }

    #[test]
    fn test_provider_error_message_carries_status_and_body() {
        let err = SearchError::Provider {
            status: 403,
            body: "quota".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("quota"));
    }
}
