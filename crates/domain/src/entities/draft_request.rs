//! Draft generation request

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{Category, Recipient};

/// A validated request for draft generation.
///
/// Construction guarantees a non-blank prompt and recipient; the category is
/// optional and, when absent, is resolved by classification downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRequest {
    prompt: String,
    recipient: Recipient,
    category: Option<Category>,
}

impl DraftRequest {
    /// Create a validated draft request.
    ///
    /// # Errors
    ///
    /// Returns an error when the prompt or the recipient is missing or blank.
    pub fn new(
        prompt: impl Into<String>,
        recipient: impl Into<String>,
        category: Option<Category>,
    ) -> Result<Self, DomainError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(DomainError::EmptyPrompt);
        }
        let recipient = Recipient::new(recipient)?;
        Ok(Self {
            prompt,
            recipient,
            category,
        })
    }

    /// The free-text prompt describing the email to draft
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The intended recipient
    pub const fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    /// The pre-selected category, when the caller chose one
    pub const fn category(&self) -> Option<Category> {
        self.category
    }
}
