//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the OpenAI completion adapter, SQLite persistence, and
//! application configuration.

pub mod adapters;
pub mod config;
pub mod persistence;

pub use adapters::OpenAiCompletionAdapter;
pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use persistence::{ConnectionPool, DatabaseError, SqliteEmailStore, create_pool};
