//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Prompt text was missing or blank
    #[error("Prompt must not be empty")]
    EmptyPrompt,

    /// Recipient address was missing or blank
    #[error("Recipient must not be empty")]
    EmptyRecipient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prompt_error_message() {
        let err = DomainError::EmptyPrompt;
        assert_eq!(err.to_string(), "Prompt must not be empty");
    }

    #[test]
    fn empty_recipient_error_message() {
        let err = DomainError::EmptyRecipient;
        assert_eq!(err.to_string(), "Recipient must not be empty");
    }
}
