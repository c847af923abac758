//! Domain entities - Objects with identity and lifecycle

mod draft_request;
mod email;

pub use draft_request::DraftRequest;
pub use email::{Email, EmailContent};
