use serde::{Deserialize, Serialize};

/// Exact `user_warning` value the model must return for low-risk messages
pub const ALL_GOOD: &str = "All Good";

pub const PARSE_FAILURE: &str = "Failed to parse JSON from LLM response";
pub const SCHEMA_MISMATCH: &str = "LLM response did not match the expected schema";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    High,
}

/// Risk assessment returned to the mobile client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Only requested by the language-less prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub sender: String,
    pub message_summary: String,
    pub risk_level: RiskLevel,
    pub risk_reason: String,
    pub user_warning: String,
}

impl AnalyzeResponse {
    /// A LOW assessment must carry the literal "All Good" warning
    pub fn is_consistent(&self) -> bool {
        self.risk_level != RiskLevel::Low || self.user_warning == ALL_GOOD
    }
}

/// Returned in place of an [`AnalyzeResponse`] when the model output is unusable
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub error: String,
    pub raw_output: String,
}

impl ErrorPayload {
    pub fn unparseable(raw_output: impl Into<String>) -> Self {
        Self {
            error: PARSE_FAILURE.to_string(),
            raw_output: raw_output.into(),
        }
    }

    pub fn schema_mismatch(raw_output: impl Into<String>) -> Self {
        Self {
            error: SCHEMA_MISMATCH.to_string(),
            raw_output: raw_output.into(),
        }
    }
}
