//! Persisted email record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::EmailId;

/// The caller-supplied fields of an email record, as accepted on create
/// and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailContent {
    /// Primary recipient address
    pub to: String,
    /// Carbon-copy recipients
    pub cc: Option<String>,
    /// Blind-carbon-copy recipients
    pub bcc: Option<String>,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

/// A stored email record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    /// Unique record identifier
    pub id: EmailId,
    /// Primary recipient address
    pub to: String,
    /// Carbon-copy recipients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    /// Blind-carbon-copy recipients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Email {
    /// Create a new record with a fresh identifier
    pub fn new(content: EmailContent) -> Self {
        Self {
            id: EmailId::new(),
            to: content.to,
            cc: content.cc,
            bcc: content.bcc,
            subject: content.subject,
            body: content.body,
            created_at: Utc::now(),
        }
    }

    /// Replace the caller-supplied fields, keeping identity and creation time
    #[must_use]
    pub fn with_content(mut self, content: EmailContent) -> Self {
        self.to = content.to;
        self.cc = content.cc;
        self.bcc = content.bcc;
        self.subject = content.subject;
        self.body = content.body;
        self
    }
}
