mod openai;

pub use openai::OpenAiProvider;

use crate::provider::{LlmError, LlmProvider};

/// Build the configured provider, or fail if no API key is set.
pub fn create_provider(
    config: &askdoc_core::config::LlmConfig,
) -> Result<Box<dyn LlmProvider>, LlmError> {
    let api_key = config
        .api_key
        .clone()
        .ok_or_else(|| LlmError::NotConfigured("OPENAI_API_KEY is not set".to_string()))?;
    Ok(Box::new(OpenAiProvider::new(
        api_key,
        config.model.clone(),
        config.base_url.clone(),
    )))
}
