//! Port definitions for the completion client
//!
//! Defines the trait that completion engines implement, plus the
//! request/response types shared by blocking and streaming modes.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

/// Request for a completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Messages in the conversation
    pub messages: Vec<CompletionMessage>,
    /// Model to use (overrides config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Whether to stream the response
    #[serde(default)]
    pub stream: bool,
}

/// A message in the completion request (OpenAI-compatible format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: String,
}

impl CompletionRequest {
    /// Create a simple single-turn request
    pub fn simple(user_message: impl Into<String>) -> Self {
        Self {
            messages: vec![CompletionMessage {
                role: "user".to_string(),
                content: user_message.into(),
            }],
            model: None,
            max_tokens: None,
            temperature: None,
            stream: false,
        }
    }

    /// Create a request with a system instruction
    pub fn with_system(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: vec![
                CompletionMessage {
                    role: "system".to_string(),
                    content: system.into(),
                },
                CompletionMessage {
                    role: "user".to_string(),
                    content: user.into(),
                },
            ],
            model: None,
            max_tokens: None,
            temperature: None,
            stream: false,
        }
    }

    /// Enable streaming for this request
    pub const fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }

    /// Set the model for this request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the token ceiling
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Response from a blocking completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A chunk of a streaming completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionChunk {
    /// Content delta, possibly empty
    pub content: String,
    /// Whether the service has signalled completion
    pub done: bool,
}

/// Type alias for streaming responses
pub type StreamingResponse =
    Pin<Box<dyn Stream<Item = Result<CompletionChunk, CompletionError>> + Send>>;

/// Port for completion engine implementations
#[async_trait]
pub trait CompletionEngine: Send + Sync {
    /// Run a completion to completion and return the full response
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError>;

    /// Open a streaming completion
    async fn complete_stream(
        &self,
        request: CompletionRequest,
    ) -> Result<StreamingResponse, CompletionError>;

    /// Get the configured default model
    fn default_model(&self) -> &str;
}
