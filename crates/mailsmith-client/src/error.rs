//! Error types for API operations.

use std::fmt;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// API client error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request error (connection, timeout, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The request had no valid session.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Message returned by the server.
        message: String,
    },

    /// The server rejected the request.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message returned by the server.
        message: String,
        /// Individual problems reported by the server.
        errors: Vec<String>,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Message provided by the server, if the failure came with one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message } | Self::Api { message, .. } if !message.is_empty() => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    /// Returns true if the failure was an authorization failure.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Category of a [`TransportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The request never produced a usable response.
    Network,
    /// No authenticated session.
    Unauthorized,
    /// The server answered with an error status.
    Server,
    /// The response or request body could not be encoded or decoded.
    Decode,
    /// The client was misconfigured.
    Config,
}

impl TransportErrorKind {
    const fn describe(self) -> &'static str {
        match self {
            Self::Network => "network failure",
            Self::Unauthorized => "unauthorized",
            Self::Server => "server error",
            Self::Decode => "invalid response",
            Self::Config => "invalid configuration",
        }
    }
}

/// A cloneable summary of a failed API call.
///
/// This is what UI state carries around: the category of failure and the
/// server's message when it supplied one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    /// Failure category.
    pub kind: TransportErrorKind,
    /// Server-provided message, if any.
    pub message: Option<String>,
}

impl TransportError {
    /// Creates a transport error.
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: Option<String>) -> Self {
        Self { kind, message }
    }

    /// Message to show the user: the server's message, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.kind.describe()),
            None => f.write_str(self.kind.describe()),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<&Error> for TransportError {
    fn from(error: &Error) -> Self {
        let kind = match error {
            Error::Http(e) if e.is_decode() => TransportErrorKind::Decode,
            Error::Http(_) => TransportErrorKind::Network,
            Error::Json(_) => TransportErrorKind::Decode,
            Error::Url(_) | Error::InvalidConfig(_) => TransportErrorKind::Config,
            Error::Unauthorized { .. } => TransportErrorKind::Unauthorized,
            Error::Api { .. } => TransportErrorKind::Server,
        };
        Self::new(kind, error.server_message().map(str::to_string))
    }
}

impl From<Error> for TransportError {
    fn from(error: Error) -> Self {
        Self::from(&error)
    }
}
