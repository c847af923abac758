//! Recipient address value object
//!
//! A recipient is required to be present but is never validated for
//! well-formedness: its only structural use is deriving the business domain
//! that personalizes sales drafts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Placeholder domain used when a recipient address has none
const DOMAIN_PLACEHOLDER: &str = "your business";

/// A draft recipient address
///
/// # Examples
///
/// ```
/// use domain::Recipient;
///
/// let recipient = Recipient::new("alice@example.com").unwrap();
/// assert_eq!(recipient.business_domain(), "example.com");
///
/// let bare = Recipient::new("alice").unwrap();
/// assert_eq!(bare.business_domain(), "your business");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipient(String);

impl Recipient {
    /// Create a recipient, requiring only that the address is non-blank.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is empty or whitespace-only.
    pub fn new(address: impl Into<String>) -> Result<Self, DomainError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(DomainError::EmptyRecipient);
        }
        Ok(Self(address))
    }

    /// Get the address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The business domain the address belongs to.
    ///
    /// This is the segment following the first `@`; when the address has no
    /// such segment (or it is empty), a fixed placeholder is returned.
    pub fn business_domain(&self) -> &str {
        match self.0.split('@').nth(1) {
            Some(domain) if !domain.is_empty() => domain,
            _ => DOMAIN_PLACEHOLDER,
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Recipient {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
