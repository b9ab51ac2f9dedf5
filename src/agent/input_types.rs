use serde::Deserialize;

/// A captured push notification as sent by the mobile client
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Purported origin of the message (app name, contact, short code...)
    pub sender: String,
    /// Message body
    pub text: String,
    /// Language the assessment should be written in
    #[serde(rename = "userLanguage")]
    #[serde(default)]
    pub user_language: Option<String>,
}

#[cfg(test)]
impl AnalyzeRequest {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            user_language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.user_language = Some(language.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_is_optional() {
        let req: AnalyzeRequest =
            serde_json::from_str(r#"{"sender": "Mom", "text": "call me"}"#).unwrap();
        assert_eq!(req.sender, "Mom");
        assert_eq!(req.user_language, None);
    }

    #[test]
    fn language_uses_camel_case_key() {
        let req: AnalyzeRequest = serde_json::from_str(
            r#"{"sender": "Bank", "text": "hi", "userLanguage": "Portuguese"}"#,
        )
        .unwrap();
        assert_eq!(req.user_language.as_deref(), Some("Portuguese"));
    }

    #[test]
    fn missing_text_is_rejected() {
        let err = serde_json::from_str::<AnalyzeRequest>(r#"{"sender": "Bank"}"#);
        assert!(err.is_err());
    }
}
