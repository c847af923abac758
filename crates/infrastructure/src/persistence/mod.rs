//! Persistence module
//!
//! SQLite-based storage for emails.

pub mod connection;
pub mod email_store;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use email_store::SqliteEmailStore;
