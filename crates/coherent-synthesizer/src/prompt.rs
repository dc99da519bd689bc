//! Prompt construction for answer synthesis and language detection

use coherent_domain::EvidenceItem;

/// Fragment that opens the evidence section of a synthesis prompt
pub const EVIDENCE_HEADER: &str = "Search Results:";

/// Fragment that opens every language detection prompt
pub const DETECTION_PREFIX: &str = "Detect the language of this text";

/// Builds the single structured prompt for answer synthesis
pub struct PromptBuilder<'a> {
    question: &'a str,
    evidence: &'a [EvidenceItem],
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(question: &'a str, evidence: &'a [EvidenceItem]) -> Self {
        Self { question, evidence }
    }

    /// Build the complete synthesis prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(SYNTHESIS_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str(&format!("User Question: \"{}\"\n\n", self.question));

        prompt.push_str(EVIDENCE_HEADER);
        prompt.push('\n');
        for (idx, item) in self.evidence.iter().enumerate() {
            prompt.push_str(&format!("Result {}:\n", idx + 1));
            prompt.push_str(&format!("- Title: {}\n", item.title));
            prompt.push_str(&format!("- Snippet: {}\n", item.snippet));
            prompt.push_str(&format!("- Source: {}\n", item.source_domain));
            prompt.push_str(&format!("- Link: {}\n", item.url));
            prompt.push_str(&format!("- Credibility: {}\n", item.credibility_tier));
            if let Some(recency) = &item.published_recency {
                prompt.push_str(&format!("- Published: {}\n", recency));
            }
            prompt.push('\n');
        }

        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt
    }
}

/// Prompt asking for a bare language code
pub fn detection_prompt(text: &str) -> String {
    format!(
        "{} and respond with just the language code (e.g., 'en', 'ar', 'es'): \"{}\"",
        DETECTION_PREFIX, text
    )
}

const SYNTHESIS_INSTRUCTIONS: &str = r#"You are MCP (Most Coherent & Probable), a reasoning assistant that reads search results and returns the single most logical, accurate and reliable answer.

Given a user question and a list of search results in any language:

1. Understand the question in its original language. Do not translate it unless the analysis requires it.
2. Weigh every result on:
   - Relevance to the question
   - Logical consistency
   - Source credibility (official sites, scientific journals, trusted domains)
   - Recency, when dates are available
   - Clarity and completeness
3. Compare the results and select the one that best satisfies these criteria.
4. Answer only in the language of the user's question.
5. Give only the best answer. Do not list or compare results, and never write "according to result 1".

Rules:
- Never invent information.
- When results conflict, prefer the most credible source.
- When every result is low quality, answer: "❌ No reliable answer found based on available results.""#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Respond with a single JSON object in exactly this format:
{
  "bestAnswer": "the answer",
  "sourceReasoning": "why the chosen source is the most trustworthy",
  "confidenceLevel": 0-100,
  "language": "language code of the question"
}"#;
