//! Streaming response handling for chat completions
//!
//! Decodes the server-sent-events framing used by `/chat/completions` with
//! `stream: true`: each event is a `data:` line carrying one JSON chunk, and
//! the sequence ends with the literal `data: [DONE]`.

use futures::future;
use futures::stream::{self, StreamExt};
use reqwest::Response;
use serde::Deserialize;
use tracing::trace;

use crate::error::CompletionError;
use crate::ports::{CompletionChunk, StreamingResponse};

/// One SSE chunk of a streaming chat completion
#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Create a streaming response from an HTTP response.
///
/// Events can be split across network reads, so undecoded bytes are carried
/// between reads in a line buffer.
pub fn create_stream(response: Response) -> StreamingResponse {
    let byte_stream = response.bytes_stream();

    let chunk_stream = byte_stream
        .scan(Vec::new(), |buffer, result| {
            let events = match result {
                Ok(bytes) => {
                    buffer.extend_from_slice(&bytes);
                    drain_events(buffer)
                },
                Err(e) => vec![Err(CompletionError::StreamError(e.to_string()))],
            };
            future::ready(Some(events))
        })
        .flat_map(stream::iter);

    Box::pin(chunk_stream)
}

/// Decode every complete line currently in the buffer, keeping the
/// unterminated remainder for the next read.
fn drain_events(buffer: &mut Vec<u8>) -> Vec<Result<CompletionChunk, CompletionError>> {
    let mut events = Vec::new();

    while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
        let line: Vec<u8> = buffer.drain(..=pos).collect();
        match std::str::from_utf8(&line) {
            Ok(text) => {
                if let Some(event) = parse_event(text.trim()) {
                    events.push(event);
                }
            },
            Err(e) => {
                events.push(Err(CompletionError::InvalidResponse(format!(
                    "Invalid UTF-8: {e}"
                ))));
            },
        }
    }

    events
}

/// Parse one SSE line. Lines without a `data:` field (blank separators,
/// comments) carry no chunk.
fn parse_event(line: &str) -> Option<Result<CompletionChunk, CompletionError>> {
    let data = line.strip_prefix("data:")?.trim_start();

    if data == "[DONE]" {
        return Some(Ok(CompletionChunk {
            content: String::new(),
            done: true,
        }));
    }

    trace!(data = %data, "Parsing stream event");

    let chunk: ChatCompletionChunk = match serde_json::from_str(data) {
        Ok(chunk) => chunk,
        Err(e) => {
            return Some(Err(CompletionError::InvalidResponse(format!(
                "JSON parse error: {e}"
            ))));
        },
    };

    let choice = chunk.choices.into_iter().next()?;

    Some(Ok(CompletionChunk {
        content: choice.delta.content.unwrap_or_default(),
        done: choice.finish_reason.is_some(),
    }))
}
