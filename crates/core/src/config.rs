use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_u16(key: &str, default: u16) -> u16 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub llm: LlmConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            storage: StorageConfig::from_env(),
            llm: LlmConfig::from_env(),
        }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  server:  {}:{}", self.server.host, self.server.port);
        tracing::info!("  storage: data_dir={}, uploads_dir={}", self.storage.data_dir.display(), self.storage.uploads_dir.display());
        tracing::info!("  uploads: max {} files per batch", self.storage.max_upload_files);
        tracing::info!("  llm:     model={}, configured={}", self.llm.model, self.llm.is_configured());
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_u16("PORT", 8000),
            cors_origin: env_or("CORS_ORIGIN", "*"),
        }
    }
}

// ── Storage ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// Where multipart uploads and Drive downloads are staged before extraction.
    pub uploads_dir: PathBuf,
    pub max_upload_files: usize,
}

impl StorageConfig {
    fn from_env() -> Self {
        let data_dir = PathBuf::from(env_or("DATA_DIR", "data"));
        let uploads_dir = env_opt("UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("uploads"));
        Self {
            data_dir,
            uploads_dir,
            max_upload_files: env_usize("MAX_UPLOAD_FILES", 5),
        }
    }
}

// ── LLM (OpenAI-compatible) ───────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmConfig {
    fn from_env() -> Self {
        Self {
            api_key: env_opt("OPENAI_API_KEY"),
            model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com"),
            temperature: env_or("LLM_TEMPERATURE", "0.5").parse().unwrap_or(0.5),
            max_tokens: env_u32("LLM_MAX_TOKENS", 500),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
