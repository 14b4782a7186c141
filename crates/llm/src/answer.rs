use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::provider::{LlmError, LlmProvider, Message, Role};

const SYSTEM_PROMPT: &str =
    "You are an AI assistant. Strictly adhere to the provided document.";

/// Answers questions about a document by sending its full text plus the
/// question to the provider and parsing the structured JSON reply.
pub struct DocumentAnswerer {
    provider: Box<dyn LlmProvider>,
    temperature: f32,
    max_tokens: u32,
}

/// The structured reply: the answer plus the part of the document it
/// was grounded in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnswer {
    pub answer: String,
    pub context: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("rate limit reached: {0}")]
    RateLimited(String),
    #[error("LLM request failed: {0}")]
    Llm(LlmError),
    #[error("failed to parse answer: {reason}")]
    InvalidAnswer { reason: String, raw_response: String },
}

impl DocumentAnswerer {
    pub fn new(provider: Box<dyn LlmProvider>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            provider,
            temperature,
            max_tokens,
        }
    }

    /// Build from config, creating the configured provider.
    pub fn from_config(config: &askdoc_core::config::LlmConfig) -> Result<Self, LlmError> {
        let provider = crate::providers::create_provider(config)?;
        Ok(Self::new(provider, config.temperature, config.max_tokens))
    }

    /// Answer `question` strictly from `document` text.
    pub async fn ask(
        &self,
        document: &str,
        question: &str,
    ) -> Result<DocumentAnswer, AnswerError> {
        info!("Answering question against {} chars of document text", document.len());

        let messages = vec![
            Message {
                role: Role::System,
                content: SYSTEM_PROMPT.to_string(),
            },
            Message {
                role: Role::User,
                content: build_prompt(document, question),
            },
        ];

        let response = self
            .provider
            .complete(messages, self.temperature, self.max_tokens)
            .await
            .map_err(|e| match e {
                LlmError::RateLimited(msg) => AnswerError::RateLimited(msg),
                other => AnswerError::Llm(other),
            })?;

        debug!("LLM response: {}", response);

        let json_str = extract_json(&response);
        serde_json::from_str(json_str).map_err(|e| AnswerError::InvalidAnswer {
            reason: e.to_string(),
            raw_response: response.clone(),
        })
    }
}

fn build_prompt(document: &str, question: &str) -> String {
    format!(
        r#"You are an AI assistant. You must answer the question strictly based on the provided document below. Do not include any information outside of this document. If the document does not contain enough information to answer, respond with "Insufficient information in the document." Do not guess or assume anything.

Document:
---
{document}
---

Question: {question}

Respond in JSON format:
{{
  "answer": "<Your Answer>",
  "context": "<Relevant Part of Document or 'Insufficient information'>"
}}
"#
    )
}

/// Extract JSON from an LLM response, handling markdown code blocks.
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    // Handle ```json ... ``` blocks
    if let Some(start) = trimmed.find("```json") {
        let json_start = start + 7;
        if let Some(end) = trimmed[json_start..].find("```") {
            return trimmed[json_start..json_start + end].trim();
        }
    }

    // Handle ``` ... ``` blocks
    if let Some(start) = trimmed.find("```") {
        let json_start = start + 3;
        // Skip past any language identifier on the same line
        let after_tick = &trimmed[json_start..];
        let content_start = after_tick.find('\n').map_or(0, |n| n + 1);
        if let Some(end) = after_tick[content_start..].find("```") {
            return after_tick[content_start..content_start + end].trim();
        }
    }

    // Try raw JSON (starts with {)
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            return &trimmed[start..=end];
        }
    }

    trimmed
}
