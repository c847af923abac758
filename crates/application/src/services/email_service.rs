//! Email service
//!
//! Business logic for stored email operations.

use std::{fmt, sync::Arc};

use domain::{Email, EmailContent, EmailId};
use tracing::{info, instrument};

use crate::{error::ApplicationError, ports::EmailStore};

/// Email service for stored email CRUD operations
pub struct EmailService {
    store: Arc<dyn EmailStore>,
}

impl fmt::Debug for EmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailService").finish_non_exhaustive()
    }
}

impl EmailService {
    /// Create a new email service
    pub fn new(store: Arc<dyn EmailStore>) -> Self {
        Self { store }
    }

    /// List all stored emails, newest first
    #[instrument(skip(self))]
    pub async fn list_emails(&self) -> Result<Vec<Email>, ApplicationError> {
        self.store.list().await
    }

    /// Fetch one email by id
    #[instrument(skip(self))]
    pub async fn get_email(&self, id: &EmailId) -> Result<Option<Email>, ApplicationError> {
        self.store.get(id).await
    }

    /// Store a new email
    #[instrument(skip(self, content))]
    pub async fn create_email(&self, content: EmailContent) -> Result<Email, ApplicationError> {
        let email = Email::new(content);
        self.store.insert(&email).await?;
        info!(id = %email.id, "Stored email");
        Ok(email)
    }

    /// Replace the content of a stored email
    #[instrument(skip(self, content))]
    pub async fn update_email(
        &self,
        id: &EmailId,
        content: EmailContent,
    ) -> Result<Option<Email>, ApplicationError> {
        self.store.update(id, content).await
    }

    /// Delete a stored email
    ///
    /// # Returns
    ///
    /// `true` when an email was deleted, `false` when the id was unknown
    #[instrument(skip(self))]
    pub async fn delete_email(&self, id: &EmailId) -> Result<bool, ApplicationError> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            info!(id = %id, "Deleted email");
        }
        Ok(deleted)
    }
}
