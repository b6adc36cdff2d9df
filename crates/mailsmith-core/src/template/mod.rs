//! Template management module.
//!
//! Provides the persisted template record, the create/update payload,
//! payload validation and storage.

mod model;
mod repository;
mod validation;

pub use model::{PersistedTemplate, TemplateId, TemplatePayload, UserId};
pub use repository::TemplateRepository;
pub use validation::{
    MIN_TITLE_LENGTH, ValidationError, ValidationResult, normalize_payload, validate_payload,
};
