//! OpenAI-compatible chat completions implementation
//!
//! Works against the hosted OpenAI API or any server exposing the same
//! `/chat/completions` contract.

mod client;
mod streaming;

pub use client::OpenAiClient;
