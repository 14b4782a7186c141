use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use askdoc_core::{DocumentSummary, QueryRecord, StoredDocument};
use askdoc_ingest::{compose, RawFile, StagedFile};

use crate::state::AppState;

use super::{error, error_with_detail, ingest_error, store_error, ApiError};

// ── Request/Response types ───────────────────────────────────────

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub document: StoredDocument,
}

#[derive(Deserialize)]
pub struct DriveLinkRequest {
    #[serde(default)]
    pub link: String,
}

#[derive(Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub history: Vec<QueryRecord>,
}

// ── POST /api/files/upload ───────────────────────────────────────

/// Multipart upload of up to `max_upload_files` files. Each part is
/// staged to the uploads dir, format-checked before any extraction,
/// composed into one document, and persisted. Staged bytes are removed
/// on every path.
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    tokio::fs::create_dir_all(&state.uploads_dir)
        .await
        .map_err(|e| {
            error_with_detail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error uploading files",
                e.to_string(),
            )
        })?;

    let mut files: Vec<RawFile> = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error_with_detail(
            StatusCode::BAD_REQUEST,
            "Malformed multipart request",
            e.to_string(),
        )
    })? {
        if field.name() != Some("files") {
            continue;
        }
        let raw_name = field.file_name().unwrap_or_default().to_string();
        if raw_name.is_empty() {
            continue;
        }
        // Strip any client-supplied path components.
        let original_name = raw_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(raw_name.as_str())
            .to_string();

        if files.len() >= state.max_upload_files {
            return Err(error(
                StatusCode::BAD_REQUEST,
                format!("Too many files (max {})", state.max_upload_files),
            ));
        }

        let bytes = field.bytes().await.map_err(|e| {
            error_with_detail(
                StatusCode::BAD_REQUEST,
                format!("Failed to read file: {original_name}"),
                e.to_string(),
            )
        })?;

        let stored_name = format!("{}-{}", Utc::now().timestamp_millis(), original_name);
        let staged = StagedFile::create(state.uploads_dir.join(stored_name), &bytes)
            .await
            .map_err(|e| {
                error_with_detail(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error uploading files",
                    e.to_string(),
                )
            })?;

        // Unsupported formats fail the batch here, before extraction.
        let raw = RawFile::new(staged, original_name)
            .map_err(|e| ingest_error("Error uploading files", e))?;
        files.push(raw);
    }

    info!("Received upload batch of {} file(s)", files.len());

    let composed = compose(files)
        .await
        .map_err(|e| ingest_error("Error uploading files", e))?;

    let document = state
        .store
        .create(&composed.title, &composed.text_content)
        .await
        .map_err(|e| store_error("Error uploading files", e))?;

    Ok(Json(UploadResponse {
        message: "Files uploaded successfully",
        document,
    }))
}

// ── POST /api/files/upload-drive-link ────────────────────────────

pub async fn upload_drive_link(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DriveLinkRequest>,
) -> Result<Json<UploadResponse>, ApiError> {
    if req.link.is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "Drive link is required"));
    }

    let acquired = state
        .drive
        .acquire(&req.link)
        .await
        .map_err(|e| ingest_error("Failed to process drive link", e))?;

    let document = state
        .store
        .create(&acquired.document.title, &acquired.document.text_content)
        .await
        .map_err(|e| store_error("Failed to process drive link", e))?;
    // `acquired` drops here: the renamed download is removed only after
    // persistence has been attempted.

    Ok(Json(UploadResponse {
        message: "Drive link processed successfully",
        document,
    }))
}

// ── GET /api/files ───────────────────────────────────────────────

pub async fn list_documents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DocumentListResponse>, ApiError> {
    let documents = state
        .store
        .list()
        .await
        .map_err(|e| store_error("Error fetching documents", e))?;
    Ok(Json(DocumentListResponse { documents }))
}

// ── GET /api/files/{document_id}/history ─────────────────────────

pub async fn document_history(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let history = state
        .store
        .history(document_id)
        .await
        .map_err(|e| store_error("Error fetching history", e))?;
    Ok(Json(HistoryResponse { history }))
}
