//! Application services - Use case implementations

mod classifier_service;
mod draft_service;
mod email_service;

pub use classifier_service::ClassifierService;
pub use draft_service::{DraftService, DraftStream};
pub use email_service::EmailService;
