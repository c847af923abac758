//! Application state shared across handlers

use std::sync::Arc;

use application::{DraftService, EmailService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Email service for stored email operations
    pub email_service: Arc<EmailService>,
    /// Draft service for generation
    pub draft_service: Arc<DraftService>,
}
