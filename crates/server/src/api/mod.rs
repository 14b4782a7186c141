//! API endpoint modules and the shared error envelope.

mod files;
mod health;
mod qa;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use askdoc_ingest::IngestError;
use askdoc_llm::AnswerError;
use askdoc_store::StoreError;

pub use files::{document_history, list_documents, upload_drive_link, upload_files};
pub use health::health;
pub use qa::ask;

// ── Error envelope ───────────────────────────────────────────────

/// Wire shape for every error response: a human-readable message plus,
/// where available, the underlying detail string.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            message: message.into(),
            error: None,
        }),
    )
}

pub(crate) fn error_with_detail(
    status: StatusCode,
    message: impl Into<String>,
    detail: impl Into<String>,
) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            message: message.into(),
            error: Some(detail.into()),
        }),
    )
}

// ── Error mapping ────────────────────────────────────────────────

/// Format/validation failures are the client's fault (400); everything
/// else surfaces as 500 under the handler's context message.
pub(crate) fn ingest_error(context: &str, e: IngestError) -> ApiError {
    match e {
        IngestError::UnsupportedFormat(_)
        | IngestError::UnableToDetermineFormat
        | IngestError::InvalidLink(_)
        | IngestError::NoFilesProvided => error(StatusCode::BAD_REQUEST, e.to_string()),
        other => error_with_detail(
            StatusCode::INTERNAL_SERVER_ERROR,
            context,
            other.to_string(),
        ),
    }
}

pub(crate) fn store_error(context: &str, e: StoreError) -> ApiError {
    match e {
        StoreError::NotFound(_) => error(StatusCode::NOT_FOUND, "Document not found"),
        other => error_with_detail(
            StatusCode::INTERNAL_SERVER_ERROR,
            context,
            other.to_string(),
        ),
    }
}

pub(crate) fn answer_error(e: AnswerError) -> ApiError {
    match e {
        AnswerError::RateLimited(detail) => error_with_detail(
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit reached. Please try after a few minutes.",
            detail,
        ),
        other => error_with_detail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error processing the question",
            other.to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400() {
        let (status, _) = ingest_error("ctx", IngestError::NoFilesProvided);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, body) = ingest_error("ctx", IngestError::UnsupportedFormat("x.exe".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Unsupported file format: x.exe");
        let (status, _) = ingest_error("ctx", IngestError::InvalidLink("nope".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn extraction_failures_map_to_500_with_context() {
        let e = IngestError::Extraction {
            format: askdoc_ingest::RecognizedFormat::Pdf,
            reason: "broken".into(),
        };
        let (status, body) = ingest_error("Error uploading files", e);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Error uploading files");
        assert!(body.error.as_deref().unwrap().contains("broken"));
    }

    #[test]
    fn missing_document_maps_to_404() {
        let (status, body) = store_error("ctx", StoreError::NotFound(uuid::Uuid::new_v4()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Document not found");
    }

    #[test]
    fn rate_limit_maps_to_429() {
        let (status, body) = answer_error(AnswerError::RateLimited("slow down".into()));
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(body.message.starts_with("Rate limit reached"));
        assert_eq!(body.error.as_deref(), Some("slow down"));
    }

    #[test]
    fn error_detail_is_omitted_when_absent() {
        let (_, body) = error(StatusCode::BAD_REQUEST, "No files uploaded");
        let json = serde_json::to_value(&body.0).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["message"], "No files uploaded");
    }
}
