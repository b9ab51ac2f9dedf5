use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// A single-shot completion request
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub instructions: String,
    pub input: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request to LLM provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode LLM provider response: {0}")]
    Decode(String),
}

/// Interface for a stateless language model
/// Stateless means the LLM keeps no memory between calls; every request
/// carries its own instructions and input.
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    /// Run one completion and return the model's raw output text
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}
