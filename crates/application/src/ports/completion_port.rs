//! Completion port - Interface for the external completion service
//!
//! The classifier and the generator both go through this one narrow
//! capability, so tests can substitute a deterministic fake without a
//! network dependency.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::ApplicationError;

/// One completion call: a system instruction, a user message, and tuning
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionCall {
    /// System instruction selecting the assistant's behavior
    pub system: String,
    /// User-turn message
    pub user: String,
    /// Token ceiling for the response
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl CompletionCall {
    /// Create a call from an instruction and a user message
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_tokens: None,
            temperature: None,
        }
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

/// Ordered text deltas from a streaming completion
pub type CompletionStream =
    Pin<Box<dyn Stream<Item = Result<String, ApplicationError>> + Send>>;

/// Port for completion operations
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Run the call to completion and return the full response text
    async fn complete(&self, call: CompletionCall) -> Result<String, ApplicationError>;

    /// Open the call in incremental mode, yielding text deltas in emission
    /// order while the upstream response is still being produced
    async fn complete_stream(
        &self,
        call: CompletionCall,
    ) -> Result<CompletionStream, ApplicationError>;
}
