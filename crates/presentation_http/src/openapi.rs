//! OpenAPI documentation module
//!
//! Provides OpenAPI 3.0 documentation for the Mailsmith HTTP API.
//! Includes Swagger UI and ReDoc for interactive API exploration.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Router, response::Html, routing::get};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// OpenAPI documentation for Mailsmith
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mailsmith API",
        version = "0.1.0",
        description = "Email management API with AI-assisted draft generation",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "emails", description = "Stored email management"),
        (name = "generate", description = "AI-assisted draft generation")
    ),
    paths(
        // Health endpoints
        handlers::health::ping,
        handlers::health::health_check,
        // Email endpoints
        handlers::emails::list_emails,
        handlers::emails::get_email,
        handlers::emails::create_email,
        handlers::emails::update_email,
        handlers::emails::delete_email,
        // Generation endpoints
        handlers::generate::generate_email,
        handlers::generate::draft_email,
    ),
    components(
        schemas(
            // Health schemas
            handlers::health::HealthResponse,
            // Email schemas
            handlers::emails::EmailResponse,
            handlers::emails::EmailsResponse,
            handlers::emails::EmailEnvelope,
            handlers::emails::EmailContentRequest,
            // Generation schemas
            handlers::generate::GenerateRequest,
            handlers::generate::GeneratedDraft,
            handlers::generate::DraftResponse,
            // Error schemas
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes
///
/// Adds the following routes:
/// - `/api-docs/openapi.json` - OpenAPI specification (used by Swagger UI)
/// - `/docs` - Swagger UI interactive documentation
/// - `/redoc` - ReDoc documentation
pub fn create_openapi_routes() -> Router<AppState> {
    let redoc = Redoc::with_url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        // ReDoc documentation
        .route("/redoc", get(|| async move { Html(redoc.to_html()) }))
        // Swagger UI with assets - SwaggerUi will serve /api-docs/openapi.json internally
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
