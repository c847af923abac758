//! Configuration for the completion client

use serde::{Deserialize, Serialize};

/// Configuration for the completion client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Base URL of the completion API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as a bearer token
    #[serde(default)]
    pub api_key: String,

    /// Default model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            model: default_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl CompletionConfig {
    /// Create a config for the hosted OpenAI API with the given key
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }
}
