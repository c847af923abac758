//! Draft generation handlers
//!
//! `POST /api/emails/generate` streams raw draft text as it is produced.
//! `POST /api/emails/draft` waits for the complete draft and returns JSON.

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::Response,
};
use domain::{Category, Draft, DraftChunk, DraftRequest};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};
use utoipa::ToSchema;

use crate::{error::ApiError, state::AppState};

/// Validation message when prompt or recipient is missing
const MISSING_FIELDS: &str = "Prompt and recipient email are required";

// ---------------------------------------------------------------------------
// Response / request DTOs
// ---------------------------------------------------------------------------

/// Draft generation request body
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({
    "prompt": "Pitch our new analytics dashboard",
    "to": "alice@acme.com",
    "assistantType": "sales"
}))]
pub struct GenerateRequest {
    /// What the email should be about
    #[serde(default)]
    pub prompt: Option<String>,
    /// Recipient email address
    #[serde(default)]
    pub to: Option<String>,
    /// Pre-selected assistant ("sales" or "follow-up"). When absent the
    /// prompt is classified first.
    #[serde(default, rename = "assistantType")]
    pub assistant_type: Option<String>,
}

/// A generated draft
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "subject": "Quick question about acme.com",
    "body": "Hi,\n\nWould love to discuss this further.\n\nBest regards"
}))]
pub struct GeneratedDraft {
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

impl From<Draft> for GeneratedDraft {
    fn from(draft: Draft) -> Self {
        Self {
            subject: draft.subject,
            body: draft.body,
        }
    }
}

/// Draft envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct DraftResponse {
    /// The generated draft
    pub draft: GeneratedDraft,
}

/// Validate the request into a domain draft request.
///
/// Runs before anything external is called, so a rejected request never
/// costs a completion call. An explicit assistant type bypasses
/// classification entirely; an empty string reads as absent.
fn build_draft_request(request: GenerateRequest) -> Result<DraftRequest, ApiError> {
    let category = request
        .assistant_type
        .filter(|kind| !kind.is_empty())
        .map(|kind| Category::parse_lenient(&kind));

    DraftRequest::new(
        request.prompt.unwrap_or_default(),
        request.to.unwrap_or_default(),
        category,
    )
    .map_err(|_| ApiError::BadRequest(MISSING_FIELDS.to_string()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Stream a generated draft as plain text
///
/// POST /api/emails/generate
#[utoipa::path(
    post,
    path = "/api/emails/generate",
    tag = "generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Draft text streamed as produced", content_type = "text/plain", body = String),
        (status = 400, description = "Missing prompt or recipient", body = crate::error::ErrorResponse),
        (status = 500, description = "Generation could not start", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn generate_email(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Response, ApiError> {
    let draft_request = build_draft_request(request)?;

    let chunks = state
        .draft_service
        .draft_stream(&draft_request)
        .await
        .map_err(|err| {
            error!(error = %err, "Failed to generate email");
            ApiError::Internal("Failed to generate email".to_string())
        })?;

    let body = Body::from_stream(chunks.map(|chunk| chunk.map(DraftChunk::into_inner)));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(body)
        .map_err(|err| {
            error!(error = %err, "Failed to build streaming response");
            ApiError::Internal("Failed to generate email".to_string())
        })
}

/// Generate a complete draft and return it as JSON
///
/// POST /api/emails/draft
#[utoipa::path(
    post,
    path = "/api/emails/draft",
    tag = "generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "The generated draft", body = DraftResponse),
        (status = 400, description = "Missing prompt or recipient", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn draft_email(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<DraftResponse>, ApiError> {
    let draft_request = build_draft_request(request)?;

    let draft = state.draft_service.draft(&draft_request).await;

    Ok(Json(DraftResponse {
        draft: draft.into(),
    }))
}
