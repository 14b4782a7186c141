use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique document identifier.
pub type DocId = Uuid;

/// A persisted document: normalized text plus its question/answer history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: DocId,
    pub title: String,
    #[serde(rename = "textContent")]
    pub text_content: String,
    #[serde(rename = "queryHistory", default)]
    pub query_history: Vec<QueryRecord>,
}

impl StoredDocument {
    /// Create a fresh document with an empty history.
    pub fn new(title: impl Into<String>, text_content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            text_content: text_content.into(),
            query_history: Vec::new(),
        }
    }
}

/// One answered question. History entries are append-only, in arrival order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    pub question: String,
    pub answer: String,
    pub context: String,
    pub timestamp: DateTime<Utc>,
}

impl QueryRecord {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            context: context.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Lightweight listing entry (id + title, no text).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: DocId,
    pub title: String,
}
