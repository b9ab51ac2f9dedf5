use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, trace};

use super::stateless_llm_interface::{CompletionRequest, LlmError, StatelessLLMInterface};

/// OpenAI Responses API client
/// Works against any gateway exposing a compatible `/responses` endpoint
pub struct OpenAiResponsesClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ResponsesEnvelope {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesEnvelope {
    /// Concatenate every `output_text` part of every message item
    fn into_output_text(self) -> String {
        if let Some(text) = self.output_text {
            return text;
        }
        self.output
            .into_iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content)
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text)
            .collect()
    }
}

impl OpenAiResponsesClient {
    pub fn new(
        base_url: String,
        api_key: String,
        request_timeout: Option<Duration>,
    ) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Initialized OpenAiResponsesClient: base_url={}", base_url);
        if api_key.is_empty() {
            tracing::warn!("No API key configured, upstream calls will likely be rejected");
        }

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }
}

#[async_trait]
impl StatelessLLMInterface for OpenAiResponsesClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/responses", self.base_url);
        trace!("POST {} model={}", url, request.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Status { status, body });
        }

        let body = response.text().await?;
        let envelope: ResponsesEnvelope =
            serde_json::from_str(&body).map_err(|e| LlmError::Decode(e.to_string()))?;
        let text = envelope.into_output_text();
        debug!("LLM output ({} chars)", text.len());
        Ok(text)
    }
}
