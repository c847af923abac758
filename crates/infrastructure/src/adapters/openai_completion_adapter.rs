//! OpenAI completion adapter - Implements CompletionPort using ai_core
//!
//! Works with any OpenAI-compatible chat completions backend.

use ai_core::{
    CompletionConfig, CompletionEngine, CompletionError, CompletionRequest, OpenAiClient,
};
use application::{
    error::ApplicationError,
    ports::{CompletionCall, CompletionPort, CompletionStream},
};
use async_trait::async_trait;
use futures::StreamExt;
use tracing::{debug, instrument};

/// Adapter for OpenAI-compatible completion backends
#[derive(Debug, Clone)]
pub struct OpenAiCompletionAdapter {
    client: OpenAiClient,
}

impl OpenAiCompletionAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: CompletionConfig) -> Result<Self, ApplicationError> {
        let client = OpenAiClient::new(config).map_err(map_error)?;
        Ok(Self { client })
    }
}

/// Convert ai_core error to application error
fn map_error(e: CompletionError) -> ApplicationError {
    ApplicationError::Completion(e.to_string())
}

/// Translate a port-level call into a wire request
fn build_request(call: CompletionCall) -> CompletionRequest {
    let mut request = CompletionRequest::with_system(call.system, call.user);
    if let Some(max_tokens) = call.max_tokens {
        request = request.with_max_tokens(max_tokens);
    }
    if let Some(temperature) = call.temperature {
        request = request.with_temperature(temperature);
    }
    request
}

#[async_trait]
impl CompletionPort for OpenAiCompletionAdapter {
    #[instrument(skip(self, call))]
    async fn complete(&self, call: CompletionCall) -> Result<String, ApplicationError> {
        let request = build_request(call);
        let response = self.client.complete(request).await.map_err(map_error)?;

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            "Completion finished"
        );

        Ok(response.content)
    }

    #[instrument(skip(self, call))]
    async fn complete_stream(
        &self,
        call: CompletionCall,
    ) -> Result<CompletionStream, ApplicationError> {
        let request = build_request(call).streaming();
        let stream = self
            .client
            .complete_stream(request)
            .await
            .map_err(map_error)?;

        // Done markers carry empty content and are dropped downstream.
        let deltas = stream.map(|chunk| chunk.map(|c| c.content).map_err(map_error));
        Ok(Box::pin(deltas))
    }
}
