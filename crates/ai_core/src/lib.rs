//! AI Core - Chat completion client
//!
//! Provides abstractions for text completion against an OpenAI-compatible
//! chat completions API, in both blocking and streaming (SSE) modes.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::CompletionConfig;
pub use error::CompletionError;
pub use openai::OpenAiClient;
pub use ports::{
    CompletionChunk, CompletionEngine, CompletionRequest, CompletionResponse, StreamingResponse,
};
