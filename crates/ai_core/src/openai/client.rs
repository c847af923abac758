//! Chat completions client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::CompletionConfig;
use crate::error::CompletionError;
use crate::ports::{
    CompletionEngine, CompletionMessage, CompletionRequest, CompletionResponse, StreamingResponse,
    TokenUsage,
};

use super::streaming::create_stream;

/// Completion engine backed by an OpenAI-compatible chat completions API
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    config: CompletionConfig,
}

impl OpenAiClient {
    /// Create a new completion client
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| CompletionError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Initialized chat completions client"
        );

        Ok(Self { client, config })
    }

    /// Get the API key
    fn api_key(&self) -> &str {
        &self.config.api_key
    }

    /// Build the chat completions endpoint URL
    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Get the model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a CompletionRequest) -> &'a str {
        request.model.as_deref().unwrap_or(&self.config.model)
    }

    fn build_payload(&self, request: &CompletionRequest, stream: bool) -> ChatCompletionPayload {
        ChatCompletionPayload {
            model: self.resolve_model(request).to_string(),
            messages: request.messages.clone(),
            stream,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

/// Wire-format chat completion request
#[derive(Debug, Serialize)]
struct ChatCompletionPayload {
    model: String,
    messages: Vec<CompletionMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Wire-format chat completion response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<UsagePayload>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsagePayload {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// API error response body
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    code: Option<String>,
}

/// Map a non-success response body to a typed error
fn decode_api_error(status: StatusCode, body: &str) -> CompletionError {
    if let Ok(api_error) = serde_json::from_str::<ApiError>(body) {
        return match api_error.error.code.as_deref() {
            Some("rate_limit_exceeded") => CompletionError::RateLimited,
            Some("model_not_found") => {
                CompletionError::ModelNotAvailable(api_error.error.message)
            },
            _ if status == StatusCode::UNAUTHORIZED => {
                CompletionError::Unauthorized(api_error.error.message)
            },
            _ => CompletionError::ServerError(api_error.error.message),
        };
    }

    if status == StatusCode::UNAUTHORIZED {
        return CompletionError::Unauthorized(format!("HTTP {status}"));
    }

    CompletionError::ServerError(format!("Status {status}: {body}"))
}

#[async_trait]
impl CompletionEngine for OpenAiClient {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request)))]
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let payload = self.build_payload(&request, false);

        debug!("Sending chat completion request");

        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(self.api_key())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Chat completion request failed");
            return Err(decode_api_error(status, &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let usage = completion.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        let choice = completion.choices.into_iter().next().ok_or_else(|| {
            CompletionError::InvalidResponse("response contained no choices".to_string())
        })?;

        debug!(tokens = ?usage, "Completion finished");

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            model: completion.model,
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request)))]
    async fn complete_stream(
        &self,
        request: CompletionRequest,
    ) -> Result<StreamingResponse, CompletionError> {
        let payload = self.build_payload(&request, true);

        debug!("Starting streaming chat completion");

        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(self.api_key())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Streaming chat completion request failed");
            return Err(decode_api_error(status, &body));
        }

        Ok(create_stream(response))
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_url_joins_base_and_endpoint() {
        let config = CompletionConfig::default();
        let client = OpenAiClient::new(config).unwrap();
        assert_eq!(
            client.chat_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn chat_url_tolerates_trailing_slash() {
        let config = CompletionConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..Default::default()
        };
        let client = OpenAiClient::new(config).unwrap();
        assert_eq!(client.chat_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn request_model_overrides_default() {
        let client = OpenAiClient::new(CompletionConfig::default()).unwrap();
        let request = CompletionRequest::simple("hi").with_model("gpt-4o");
        assert_eq!(client.resolve_model(&request), "gpt-4o");
    }

    #[test]
    fn default_model_getter() {
        let client = OpenAiClient::new(CompletionConfig::default()).unwrap();
        assert_eq!(client.default_model(), "gpt-3.5-turbo");
    }

    #[test]
    fn unauthorized_error_body_is_decoded() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let err = decode_api_error(StatusCode::UNAUTHORIZED, body);
        assert!(matches!(err, CompletionError::Unauthorized(_)));
    }

    #[test]
    fn rate_limit_error_body_is_decoded() {
        let body = r#"{"error":{"message":"Rate limit exceeded","type":"rate_limit_error","code":"rate_limit_exceeded"}}"#;
        let err = decode_api_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert!(matches!(err, CompletionError::RateLimited));
    }

    #[test]
    fn unknown_error_body_falls_back_to_server_error() {
        let err = decode_api_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(err, CompletionError::ServerError(_)));
    }
}
