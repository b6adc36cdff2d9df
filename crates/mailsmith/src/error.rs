//! Error types for the editor crate.

/// Result type alias for editor setup operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or starting an editor.
///
/// Failures of the editing commands themselves are reported through
/// [`crate::CommandError`] and user notices instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error reading or writing configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed or written.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// API client could not be built.
    #[error("Client error: {0}")]
    Client(#[from] mailsmith_client::Error),

    /// Logging was already initialised or the filter is invalid.
    #[error("Logging error: {0}")]
    Logging(String),
}
