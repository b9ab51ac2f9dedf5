use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn, Instrument};

use crate::agent::input_types::AnalyzeRequest;
use crate::agent::output_types::{AnalyzeResponse, ErrorPayload};
use crate::agent::prompts::{system_prompt, user_prompt};
use crate::agent::stateless_llm::{CompletionRequest, LlmError};
use crate::state::AppState;

/// Run one message through the model and shape the reply for the client.
///
/// Only upstream failures are returned as `Err`; unusable model output is
/// turned into an [`ErrorPayload`] value.
pub async fn analyze_message(
    state: &AppState,
    request: AnalyzeRequest,
) -> Result<Value, LlmError> {
    let request_id = state.generate_request_id();
    let span = tracing::info_span!("analyze", %request_id);

    async move {
        info!(
            "Analyzing message from {:?} (language: {:?})",
            request.sender, request.user_language
        );
        debug!("Message content: {:?}", request.text);

        let llm_config = &state.config.llm;
        let completion = CompletionRequest {
            model: llm_config.model.clone(),
            instructions: system_prompt(&request).to_string(),
            input: user_prompt(&request),
            temperature: llm_config.temperature,
            max_output_tokens: llm_config.max_output_tokens,
        };

        let raw_output = state.llm.complete(completion).await?;
        Ok::<_, LlmError>(interpret_output(raw_output, llm_config.validate_response))
    }
    .instrument(span)
    .await
}

/// Decode model output as JSON, falling back to an error payload
pub fn interpret_output(raw_output: String, validate: bool) -> Value {
    let value: Value = match serde_json::from_str(&raw_output) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to parse LLM output as JSON: {}", e);
            return error_value(ErrorPayload::unparseable(raw_output));
        }
    };

    if validate {
        match AnalyzeResponse::deserialize(&value) {
            Ok(response) if response.is_consistent() => {}
            Ok(_) => {
                warn!("LLM marked message LOW risk without the \"All Good\" warning");
                return error_value(ErrorPayload::schema_mismatch(raw_output));
            }
            Err(e) => {
                warn!("LLM output does not match response schema: {}", e);
                return error_value(ErrorPayload::schema_mismatch(raw_output));
            }
        }
    }

    info!(
        "Risk level: {}",
        value.get("risk_level").and_then(|v| v.as_str()).unwrap_or("<missing>")
    );
    value
}

fn error_value(payload: ErrorPayload) -> Value {
    // Two string fields; serialization cannot fail
    serde_json::to_value(payload).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const HIGH: &str = r#"{
        "sender": "Bank of Example",
        "message_summary": "Claims the account is locked and asks to click a link.",
        "risk_level": "HIGH",
        "risk_reason": "Urgency plus a verification link is a classic phishing pattern.",
        "user_warning": "I see Bank of Example says your account is locked. This could be a fake login page stealing your password."
    }"#;

    #[test]
    fn valid_json_passes_through_unchanged() {
        let expected: Value = serde_json::from_str(HIGH).unwrap();
        assert_eq!(interpret_output(HIGH.to_string(), false), expected);
        assert_eq!(interpret_output(HIGH.to_string(), true), expected);
    }

    #[test]
    fn key_order_and_big_integers_survive() {
        let raw = r#"{"sender":"Bank","message_summary":"m","risk_level":"HIGH","risk_reason":"r","user_warning":"w","n":123456789012345678901234567890}"#;
        let out = interpret_output(raw.to_string(), false);
        assert_eq!(serde_json::to_string(&out).unwrap(), raw);
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        let out = interpret_output("\n  {\"risk_level\": \"LOW\"}  \n".to_string(), false);
        assert_eq!(out, json!({"risk_level": "LOW"}));
    }

    #[test]
    fn non_json_becomes_error_payload() {
        let out = interpret_output("Sorry, I cannot help with that.".to_string(), false);
        assert_eq!(
            out,
            json!({
                "error": "Failed to parse JSON from LLM response",
                "raw_output": "Sorry, I cannot help with that."
            })
        );
    }

    #[test]
    fn fenced_json_is_not_unwrapped() {
        let raw = "```json\n{\"risk_level\": \"LOW\"}\n```";
        let out = interpret_output(raw.to_string(), false);
        assert_eq!(out["error"], "Failed to parse JSON from LLM response");
        assert_eq!(out["raw_output"], raw);
    }

    #[test]
    fn permissive_mode_keeps_partial_objects() {
        let out = interpret_output(r#"{"risk_level": "MEDIUM"}"#.to_string(), false);
        assert_eq!(out, json!({"risk_level": "MEDIUM"}));
    }

    #[test]
    fn validating_mode_rejects_schema_mismatch() {
        let raw = r#"{"risk_level": "MEDIUM"}"#;
        let out = interpret_output(raw.to_string(), true);
        assert_eq!(
            out,
            json!({
                "error": "LLM response did not match the expected schema",
                "raw_output": raw
            })
        );
    }

    #[test]
    fn validating_mode_enforces_all_good_for_low_risk() {
        let raw = json!({
            "sender": "Mom",
            "message_summary": "Asks about dinner.",
            "risk_level": "LOW",
            "risk_reason": "Ordinary family message.",
            "user_warning": "Nothing to worry about."
        })
        .to_string();
        let out = interpret_output(raw, true);
        assert_eq!(out["error"], "LLM response did not match the expected schema");

        let raw = json!({
            "model": "gpt-4o-mini",
            "sender": "Mom",
            "message_summary": "Asks about dinner.",
            "risk_level": "LOW",
            "risk_reason": "Ordinary family message.",
            "user_warning": "All Good"
        });
        assert_eq!(interpret_output(raw.to_string(), true), raw);
    }
}
