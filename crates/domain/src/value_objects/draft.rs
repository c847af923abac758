//! Generated draft output
//!
//! A draft arrives either fully formed (blocking generation) or as an ordered
//! sequence of opaque text chunks (streaming generation) that the consumer
//! concatenates before interpreting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A generated email draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

impl Draft {
    /// Create a draft from subject and body text
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// One ordered fragment of streamed draft text.
///
/// Chunks carry no structure of their own; they are meaningful only when
/// concatenated in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftChunk(String);

impl DraftChunk {
    /// Wrap a text fragment
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    /// Get the fragment text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the fragment carries no text
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the chunk, yielding its text
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for DraftChunk {
    fn from(content: String) -> Self {
        Self(content)
    }
}

impl fmt::Display for DraftChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
