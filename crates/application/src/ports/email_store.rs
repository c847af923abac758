//! Email store port - Interface for email persistence

use async_trait::async_trait;
use domain::{Email, EmailContent, EmailId};

use crate::error::ApplicationError;

/// Port for stored email operations
#[async_trait]
pub trait EmailStore: Send + Sync {
    /// List all stored emails, newest first
    ///
    /// # Returns
    ///
    /// Every stored email ordered by creation time descending
    async fn list(&self) -> Result<Vec<Email>, ApplicationError>;

    /// Fetch one email by id
    ///
    /// # Returns
    ///
    /// The email, or `None` when no email has that id
    async fn get(&self, id: &EmailId) -> Result<Option<Email>, ApplicationError>;

    /// Persist a new email
    async fn insert(&self, email: &Email) -> Result<(), ApplicationError>;

    /// Replace the content of an existing email
    ///
    /// # Returns
    ///
    /// The updated email, or `None` when no email has that id
    async fn update(
        &self,
        id: &EmailId,
        content: EmailContent,
    ) -> Result<Option<Email>, ApplicationError>;

    /// Remove an email
    ///
    /// # Returns
    ///
    /// `true` when an email was removed, `false` when the id was unknown
    async fn delete(&self, id: &EmailId) -> Result<bool, ApplicationError>;
}
