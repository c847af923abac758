//! SQLite email store implementation
//!
//! Implements the EmailStore port using SQLite. All queries run on the
//! blocking thread pool so the async executor is never stalled.

use std::sync::Arc;

use application::{error::ApplicationError, ports::EmailStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Email, EmailContent, EmailId};
use rusqlite::{Row, params};
use tokio::task;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::connection::ConnectionPool;

/// SQLite-based email store
#[derive(Debug, Clone)]
pub struct SqliteEmailStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteEmailStore {
    /// Create a new SQLite email store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailStore for SqliteEmailStore {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Email>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let mut stmt = conn
                .prepare(
                    "SELECT id, recipient, cc, bcc, subject, body, created_at
                     FROM emails ORDER BY created_at DESC",
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let emails: Vec<Email> = stmt
                .query_map([], row_to_email)
                .map_err(|e| ApplicationError::Internal(e.to_string()))?
                .filter_map(Result::ok)
                .collect();

            debug!(count = emails.len(), "Listed emails");
            Ok(emails)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(email_id = %id))]
    async fn get(&self, id: &EmailId) -> Result<Option<Email>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            conn.query_row(
                "SELECT id, recipient, cc, bcc, subject, body, created_at
                 FROM emails WHERE id = ?1",
                [&id_str],
                row_to_email,
            )
            .optional()
            .map_err(|e| ApplicationError::Internal(e.to_string()))
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, email), fields(email_id = %email.id))]
    async fn insert(&self, email: &Email) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let email = email.clone();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            conn.execute(
                "INSERT INTO emails (id, recipient, cc, bcc, subject, body, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    email.id.to_string(),
                    email.to,
                    email.cc,
                    email.bcc,
                    email.subject,
                    email.body,
                    email.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!("Saved email");
            Ok(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self, content), fields(email_id = %id))]
    async fn update(
        &self,
        id: &EmailId,
        content: EmailContent,
    ) -> Result<Option<Email>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let existing = conn
                .query_row(
                    "SELECT id, recipient, cc, bcc, subject, body, created_at
                     FROM emails WHERE id = ?1",
                    [&id_str],
                    row_to_email,
                )
                .optional()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            if let Some(email) = existing {
                let updated = email.with_content(content);
                conn.execute(
                    "UPDATE emails SET recipient = ?1, cc = ?2, bcc = ?3, subject = ?4, body = ?5
                     WHERE id = ?6",
                    params![
                        updated.to,
                        updated.cc,
                        updated.bcc,
                        updated.subject,
                        updated.body,
                        id_str,
                    ],
                )
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

                debug!("Updated email");
                Ok(Some(updated))
            } else {
                Ok(None)
            }
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }

    #[instrument(skip(self), fields(email_id = %id))]
    async fn delete(&self, id: &EmailId) -> Result<bool, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            let deleted = conn
                .execute("DELETE FROM emails WHERE id = ?1", [&id_str])
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;

            debug!(deleted, "Deleted email");
            Ok(deleted > 0)
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

fn row_to_email(row: &Row<'_>) -> rusqlite::Result<Email> {
    let id_str: String = row.get(0)?;
    let to: String = row.get(1)?;
    let cc: Option<String> = row.get(2)?;
    let bcc: Option<String> = row.get(3)?;
    let subject: String = row.get(4)?;
    let body: String = row.get(5)?;
    let created_at_str: String = row.get(6)?;

    let id = EmailId::from(Uuid::parse_str(&id_str).unwrap_or_else(|_| Uuid::new_v4()));
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

    Ok(Email {
        id,
        to,
        cc,
        bcc,
        subject,
        body,
        created_at,
    })
}

// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalExt<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
