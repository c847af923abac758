//! HTTP route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health checks
        .route("/ping", get(handlers::health::ping))
        .route("/health", get(handlers::health::health_check))
        // Stored emails
        .route(
            "/api/emails",
            get(handlers::emails::list_emails).post(handlers::emails::create_email),
        )
        .route(
            "/api/emails/{id}",
            get(handlers::emails::get_email)
                .put(handlers::emails::update_email)
                .delete(handlers::emails::delete_email),
        )
        // Draft generation
        .route("/api/emails/generate", post(handlers::generate::generate_email))
        .route("/api/emails/draft", post(handlers::generate::draft_email))
        // API documentation
        .merge(crate::openapi::create_openapi_routes())
        .with_state(state)
}
