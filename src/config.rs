use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::Result;
use regex::Regex;
use tracing::{debug, info};

use crate::agent::prompts::DEFAULT_MODEL;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upstream model provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Reject parseable model output that does not fit the response schema
    #[serde(default)]
    pub validate_response: bool,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_output_tokens() -> u32 {
    300
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: None,
            validate_response: false,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let bytes = fs::read(path)?;
        // Strips a UTF-8 BOM if present
        let (content, _, _) = encoding_rs::UTF_8.decode(&bytes);
        let content = substitute_env_vars(&content);

        // Determine file type by extension
        let path_lower = path.to_lowercase();
        let config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Candidate config files, most specific first
    pub fn search_paths(config_path: Option<String>) -> Vec<String> {
        vec![
            config_path,
            Some("conf.yaml".to_string()),
            Some("conf.json".to_string()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first existing file in `paths`, or fall back to defaults.
    /// A file that exists but fails to parse is an error.
    pub fn discover(paths: &[String]) -> Result<Self> {
        for path in paths {
            if !Path::new(path).exists() {
                debug!("No config at {}", path);
                continue;
            }
            let config = Self::load(path)?;
            info!("Loaded configuration from: {}", path);
            return Ok(config);
        }
        info!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Apply process environment on top of file values
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.llm.api_key.is_empty() {
            if let Some(key) = lookup("OPENAI_API_KEY") {
                self.llm.api_key = key;
            }
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }
}

/// Replace `${VAR_NAME}` with the variable's value; unknown variables are left as-is
pub fn substitute_env_vars(content: &str) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("static regex");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
