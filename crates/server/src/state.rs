use std::path::PathBuf;

use askdoc_ingest::DriveAcquirer;
use askdoc_llm::DocumentAnswerer;
use askdoc_store::DocumentStore;

pub struct AppState {
    pub store: DocumentStore,
    /// None when no API key is configured; /api/qa/ask reports that.
    pub answerer: Option<DocumentAnswerer>,
    pub drive: DriveAcquirer,
    pub uploads_dir: PathBuf,
    pub max_upload_files: usize,
}
