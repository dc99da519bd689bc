//! Parse model output into an answer
//!
//! Parsing is lenient about content and strict about shape: the response
//! must be one JSON object, but every field in it is optional.

use crate::error::SynthesizerError;
use coherent_domain::{Confidence, UNKNOWN_LANGUAGE};
use serde_json::{Map, Value};

/// Answer used when the model gives none
pub const NO_ANSWER: &str = "❌ No reliable answer found based on available results.";

/// Justification used when the model gives none
pub const NO_REASONING: &str = "Unable to determine source credibility.";

/// Fields recovered from a synthesis response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnswer {
    /// Best answer, or [`NO_ANSWER`]
    pub best_answer: String,
    /// Source reasoning, or [`NO_REASONING`]
    pub justification: String,
    /// Clamped confidence, 0 when absent or not a number
    pub confidence: Confidence,
    /// Language code, or "unknown"
    pub language: String,
}

/// Parse a synthesis response
pub fn parse_synthesis_response(response: &str) -> Result<ParsedAnswer, SynthesizerError> {
    let json_str = extract_json(response)?;
    let json: Value = serde_json::from_str(&json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| SynthesizerError::InvalidFormat("Expected JSON object".to_string()))?;

    let confidence = obj
        .get("confidenceLevel")
        .and_then(Value::as_f64)
        .map(Confidence::from_raw)
        .unwrap_or(Confidence::MIN);

    Ok(ParsedAnswer {
        best_answer: text_field(obj, "bestAnswer").unwrap_or_else(|| NO_ANSWER.to_string()),
        justification: text_field(obj, "sourceReasoning").unwrap_or_else(|| NO_REASONING.to_string()),
        confidence,
        language: text_field(obj, "language").unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
    })
}

/// Clean a language detection response down to a bare code
///
/// Returns `None` when nothing usable is left.
pub fn parse_language_code(response: &str) -> Option<String> {
    let code = response
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`' || c == '.')
        .trim();

    if code.is_empty() {
        None
    } else {
        Some(code.to_string())
    }
}

/// Non-empty string field
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, SynthesizerError> {
    let trimmed = response.trim();

    if trimmed.is_empty() {
        return Err(SynthesizerError::InvalidFormat("Empty response".to_string()));
    }

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(SynthesizerError::InvalidFormat("Empty code block".to_string()));
        }

        let end = if lines[lines.len() - 1].trim() == "```" {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}
