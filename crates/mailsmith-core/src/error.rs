//! Error types for the core library.

use thiserror::Error;

use crate::template::TemplateId;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Template not found (or not owned by the requesting user).
    #[error("Template not found: {0}")]
    TemplateNotFound(TemplateId),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
