use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use anyhow::Result;

use crate::agent::stateless_llm::{OpenAiResponsesClient, StatelessLLMInterface};
use crate::config::LlmConfig;

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create an LLM client based on the configuration.
    ///
    /// # Arguments
    /// * `config` - LLM section of the application config
    pub fn create_llm(config: &LlmConfig) -> Result<Arc<dyn StatelessLLMInterface>> {
        info!("Initializing LLM: {} ({})", config.provider, config.model);

        match config.provider.as_str() {
            "openai" | "openai_responses" => Ok(Arc::new(OpenAiResponsesClient::new(
                config.base_url.clone(),
                config.api_key.clone(),
                config.request_timeout_secs.map(Duration::from_secs),
            )?)),
            _ => Err(anyhow::anyhow!("Unsupported LLM provider: {}", config.provider)),
        }
    }
}
