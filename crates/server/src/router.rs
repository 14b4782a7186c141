//! HTTP router construction.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>, cors_origin: &str) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(
            "/api/files/upload",
            post(api::upload_files).layer(DefaultBodyLimit::max(100 * 1024 * 1024)),
        )
        .route("/api/files/upload-drive-link", post(api::upload_drive_link))
        .route("/api/files", get(api::list_documents))
        .route("/api/files/{document_id}/history", get(api::document_history))
        .route("/api/qa/ask", post(api::ask))
        .layer(cors_layer(cors_origin))
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            warn!("CORS_ORIGIN '{}' is not a valid header value — allowing any origin", origin);
            CorsLayer::permissive()
        }
    }
}
