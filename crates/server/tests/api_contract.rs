//! Wire-contract tests for the HTTP API.
//!
//! `askdoc-server` is a binary crate (no lib.rs), so the JSON contract is
//! validated via mirror types matching what clients send and receive.

use serde::{Deserialize, Serialize};

// ── Mirror types matching the API JSON contract ──────────────────

#[derive(Debug, Serialize, Deserialize)]
struct DriveLinkRequest {
    link: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AskRequest {
    document_id: uuid::Uuid,
    question: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AskResponse {
    answer: String,
    relevant_context: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredDocumentWire {
    id: uuid::Uuid,
    title: String,
    #[serde(rename = "textContent")]
    text_content: String,
    #[serde(rename = "queryHistory")]
    query_history: Vec<QueryRecordWire>,
}

#[derive(Debug, Serialize, Deserialize)]
struct QueryRecordWire {
    question: String,
    answer: String,
    context: String,
    timestamp: chrono::DateTime<chrono::Utc>,
}

// ── Tests ────────────────────────────────────────────────────────

#[test]
fn ask_request_uses_camel_case_document_id() {
    let json = r#"{"documentId": "9f8e7d6c-5b4a-4f3e-8d2c-1b0a99887766", "question": "What?"}"#;
    let req: AskRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.question, "What?");
}

#[test]
fn ask_response_round_trips_relevant_context() {
    let resp = AskResponse {
        answer: "42".into(),
        relevant_context: "the section about 42".into(),
    };
    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json["relevantContext"], "the section about 42");
    assert_eq!(json["answer"], "42");
}

#[test]
fn stored_document_matches_persisted_layout() {
    let json = r#"{
        "id": "9f8e7d6c-5b4a-4f3e-8d2c-1b0a99887766",
        "title": "a.txt, b.pdf",
        "textContent": "File: a.txt\nalpha\n\n",
        "queryHistory": [
            {"question": "q", "answer": "a", "context": "c", "timestamp": "2025-01-01T00:00:00Z"}
        ]
    }"#;
    let doc: StoredDocumentWire = serde_json::from_str(json).unwrap();
    assert_eq!(doc.title, "a.txt, b.pdf");
    assert_eq!(doc.query_history.len(), 1);
    assert_eq!(doc.query_history[0].question, "q");
}

#[test]
fn error_envelope_detail_is_optional() {
    let bare: ErrorResponse = serde_json::from_str(r#"{"message": "No files uploaded"}"#).unwrap();
    assert!(bare.error.is_none());

    let detailed: ErrorResponse =
        serde_json::from_str(r#"{"message": "Error uploading files", "error": "boom"}"#).unwrap();
    assert_eq!(detailed.error.as_deref(), Some("boom"));
}

#[test]
fn drive_link_request_shape() {
    let req: DriveLinkRequest =
        serde_json::from_str(r#"{"link": "https://drive.google.com/file/d/abc123/view"}"#).unwrap();
    assert!(req.link.contains("/file/d/"));
}
