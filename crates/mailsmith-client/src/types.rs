//! Request and response bodies of the email endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST emails/preview`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    /// Serialized document to render.
    pub content: String,
    /// Preview text injected into the rendered email.
    pub preview_text: String,
}

/// Response of `POST emails/preview`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// Rendered email HTML.
    pub html: String,
}

/// Body of `POST emails/send`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    /// Subject line.
    pub subject: String,
    /// Preview text.
    pub preview_text: String,
    /// Sender, e.g. `Jane <jane@example.com>`.
    pub from: String,
    /// Recipient(s).
    pub to: String,
    /// Reply-to address, empty when unused.
    pub reply_to: String,
    /// Serialized document.
    pub content: String,
}
