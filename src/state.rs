use std::sync::Arc;
use uuid::Uuid;

use crate::agent::stateless_llm::StatelessLLMInterface;
use crate::agent::stateless_llm_factory::StatelessLLMFactory;
use crate::config::Config;

/// Process-wide state, built once at startup and cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: Arc<dyn StatelessLLMInterface>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let llm = StatelessLLMFactory::create_llm(&config.llm)?;
        Ok(Self::with_llm(config, llm))
    }

    pub fn with_llm(config: Config, llm: Arc<dyn StatelessLLMInterface>) -> Self {
        Self {
            config: Arc::new(config),
            llm,
        }
    }

    pub fn generate_request_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
