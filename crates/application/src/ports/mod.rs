//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod completion_port;
mod email_store;

pub use completion_port::{CompletionCall, CompletionPort, CompletionStream};
pub use email_store::EmailStore;
