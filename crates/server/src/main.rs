mod api;
mod router;
mod state;

use std::sync::Arc;

use tracing::{info, warn};

use askdoc_ingest::DriveAcquirer;
use askdoc_llm::DocumentAnswerer;
use askdoc_store::DocumentStore;

fn load_config() -> askdoc_core::Config {
    askdoc_core::config::load_dotenv();
    askdoc_core::Config::from_env()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config = load_config();
    config.log_summary();

    tokio::fs::create_dir_all(&config.storage.uploads_dir).await?;

    let store = DocumentStore::new(&config.storage.data_dir).await?;
    let answerer = match DocumentAnswerer::from_config(&config.llm) {
        Ok(a) => Some(a),
        Err(e) => {
            warn!("LLM answerer not available: {} — POST /api/qa/ask will be disabled", e);
            None
        }
    };
    let drive = DriveAcquirer::new(config.storage.uploads_dir.clone());

    let state = Arc::new(state::AppState {
        store,
        answerer,
        drive,
        uploads_dir: config.storage.uploads_dir.clone(),
        max_upload_files: config.storage.max_upload_files,
    });

    let app = router::build_router(state, &config.server.cors_origin);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://localhost:{}", config.server.port);
    axum::serve(listener, app).await?;

    Ok(())
}
