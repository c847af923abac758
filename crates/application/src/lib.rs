//! Application layer - Use cases and orchestration
//!
//! Contains application-level services, prompt templates, and port
//! definitions. Orchestrates domain objects and infrastructure adapters.

pub mod error;
pub mod ports;
pub mod prompts;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
