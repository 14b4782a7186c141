use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use askdoc_core::QueryRecord;

use crate::state::AppState;

use super::{answer_error, error, store_error, ApiError};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub document_id: Uuid,
    pub question: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub answer: String,
    pub relevant_context: String,
}

// ── POST /api/qa/ask ─────────────────────────────────────────────

/// Answer a question about a stored document and append the exchange to
/// its history.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let answerer = state.answerer.as_ref().ok_or_else(|| {
        error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Question answering is not configured. Set OPENAI_API_KEY.",
        )
    })?;

    let document = state
        .store
        .get(req.document_id)
        .await
        .map_err(|e| store_error("Error processing the question", e))?;

    info!("Question for document {}: {}", document.id, req.question);

    let answer = answerer
        .ask(&document.text_content, &req.question)
        .await
        .map_err(answer_error)?;

    state
        .store
        .append_history(
            document.id,
            QueryRecord::new(req.question.clone(), answer.answer.clone(), answer.context.clone()),
        )
        .await
        .map_err(|e| store_error("Error processing the question", e))?;

    Ok(Json(AskResponse {
        answer: answer.answer,
        relevant_context: answer.context,
    }))
}
