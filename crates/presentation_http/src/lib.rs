//! Mailsmith HTTP presentation layer
//!
//! Axum routes, handlers, and OpenAPI documentation for the email
//! management and draft generation API.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
