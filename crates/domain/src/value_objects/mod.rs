//! Value Objects - Immutable, identity-less domain primitives

mod category;
mod draft;
mod email_id;
mod recipient;

pub use category::Category;
pub use draft::{Draft, DraftChunk};
pub use email_id::EmailId;
pub use recipient::Recipient;
