//! Stored email handlers
//!
//! REST API endpoints for email CRUD operations.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use domain::{Email, EmailContent, EmailId};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use utoipa::ToSchema;

use crate::{error::ApiError, state::AppState};

// ---------------------------------------------------------------------------
// Response / request DTOs
// ---------------------------------------------------------------------------

/// A stored email
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "id": "550e8400-e29b-41d4-a716-446655440000",
    "to": "alice@acme.com",
    "subject": "Quick question about acme.com",
    "body": "Hi,\n\nWould love to discuss this further.\n\nBest regards",
    "created_at": "2024-01-15T10:30:00Z"
}))]
pub struct EmailResponse {
    /// Unique email ID
    pub id: String,
    /// Recipient address
    pub to: String,
    /// CC addresses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    /// BCC addresses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcc: Option<String>,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Email> for EmailResponse {
    fn from(email: Email) -> Self {
        Self {
            id: email.id.to_string(),
            to: email.to,
            cc: email.cc,
            bcc: email.bcc,
            subject: email.subject,
            body: email.body,
            created_at: email.created_at,
        }
    }
}

/// List envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct EmailsResponse {
    /// Stored emails, newest first
    pub emails: Vec<EmailResponse>,
}

/// Single-email envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct EmailEnvelope {
    /// The email
    pub email: EmailResponse,
}

/// Request body for creating or updating an email
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "to": "alice@acme.com",
    "subject": "Hello",
    "body": "Just checking in."
}))]
pub struct EmailContentRequest {
    /// Recipient address
    pub to: String,
    /// CC addresses
    #[serde(default)]
    pub cc: Option<String>,
    /// BCC addresses
    #[serde(default)]
    pub bcc: Option<String>,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

impl From<EmailContentRequest> for EmailContent {
    fn from(request: EmailContentRequest) -> Self {
        Self {
            to: request.to,
            cc: request.cc,
            bcc: request.bcc,
            subject: request.subject,
            body: request.body,
        }
    }
}

/// Map a path id onto an email id.
///
/// A malformed id can never name a stored email, so it reads as not found
/// rather than as a client syntax error.
fn parse_email_id(id: &str) -> Result<EmailId, ApiError> {
    EmailId::parse(id).map_err(|_| ApiError::NotFound("Email not found".to_string()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// List all stored emails, newest first
///
/// GET /api/emails
#[utoipa::path(
    get,
    path = "/api/emails",
    tag = "emails",
    responses(
        (status = 200, description = "All stored emails", body = EmailsResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_emails(State(state): State<AppState>) -> Result<Json<EmailsResponse>, ApiError> {
    let emails = state.email_service.list_emails().await.map_err(|err| {
        error!(error = %err, "Failed to fetch emails");
        ApiError::Internal("Failed to fetch emails".to_string())
    })?;

    debug!(count = emails.len(), "Listed emails");
    Ok(Json(EmailsResponse {
        emails: emails.into_iter().map(EmailResponse::from).collect(),
    }))
}

/// Fetch one stored email
///
/// GET /api/emails/:id
#[utoipa::path(
    get,
    path = "/api/emails/{id}",
    tag = "emails",
    params(
        ("id" = String, Path, description = "Email ID")
    ),
    responses(
        (status = 200, description = "The email", body = EmailEnvelope),
        (status = 404, description = "No email with that id", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmailEnvelope>, ApiError> {
    let id = parse_email_id(&id)?;

    let email = state.email_service.get_email(&id).await.map_err(|err| {
        error!(error = %err, "Failed to fetch email");
        ApiError::Internal("Failed to fetch email".to_string())
    })?;

    email.map_or_else(
        || Err(ApiError::NotFound("Email not found".to_string())),
        |email| Ok(Json(EmailEnvelope { email: email.into() })),
    )
}

/// Store a new email
///
/// POST /api/emails
#[utoipa::path(
    post,
    path = "/api/emails",
    tag = "emails",
    request_body = EmailContentRequest,
    responses(
        (status = 201, description = "Email created", body = EmailEnvelope),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_email(
    State(state): State<AppState>,
    Json(body): Json<EmailContentRequest>,
) -> Result<(StatusCode, Json<EmailEnvelope>), ApiError> {
    let email = state
        .email_service
        .create_email(body.into())
        .await
        .map_err(|err| {
            error!(error = %err, "Failed to create email");
            ApiError::Internal("Failed to create email".to_string())
        })?;

    Ok((
        StatusCode::CREATED,
        Json(EmailEnvelope {
            email: email.into(),
        }),
    ))
}

/// Replace the content of a stored email
///
/// PUT /api/emails/:id
#[utoipa::path(
    put,
    path = "/api/emails/{id}",
    tag = "emails",
    params(
        ("id" = String, Path, description = "Email ID")
    ),
    request_body = EmailContentRequest,
    responses(
        (status = 200, description = "Updated email", body = EmailEnvelope),
        (status = 404, description = "No email with that id", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn update_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<EmailContentRequest>,
) -> Result<Json<EmailEnvelope>, ApiError> {
    let id = parse_email_id(&id)?;

    let updated = state
        .email_service
        .update_email(&id, body.into())
        .await
        .map_err(|err| {
            error!(error = %err, "Failed to update email");
            ApiError::Internal("Failed to update email".to_string())
        })?;

    updated.map_or_else(
        || Err(ApiError::NotFound("Email not found".to_string())),
        |email| Ok(Json(EmailEnvelope { email: email.into() })),
    )
}

/// Delete a stored email
///
/// DELETE /api/emails/:id
#[utoipa::path(
    delete,
    path = "/api/emails/{id}",
    tag = "emails",
    params(
        ("id" = String, Path, description = "Email ID")
    ),
    responses(
        (status = 204, description = "Email deleted"),
        (status = 404, description = "No email with that id", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_email_id(&id)?;

    let deleted = state.email_service.delete_email(&id).await.map_err(|err| {
        error!(error = %err, "Failed to delete email");
        ApiError::Internal("Failed to delete email".to_string())
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Email not found".to_string()))
    }
}
