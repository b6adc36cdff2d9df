//! Structured rich-text documents.
//!
//! Template content is a JSON document produced by the rich-text editing
//! widget. The core never interprets the schema; it only parses, serializes
//! and compares documents, and supplies the built-in default used whenever a
//! draft has no usable content.

use serde_json::{Value, json};

/// A structured rich-text document.
pub type Document = Value;

/// Error raised when a serialized document cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The serialized document was empty or whitespace.
    #[error("Document is empty")]
    Empty,

    /// The serialized document is not valid JSON.
    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The compiled-in document new templates start from.
#[must_use]
pub fn default_document() -> Document {
    json!({
        "type": "doc",
        "content": [
            {
                "type": "heading",
                "attrs": { "textAlign": "left", "level": 2 },
                "content": [
                    { "type": "text", "marks": [{ "type": "bold" }], "text": "Welcome aboard" }
                ]
            },
            {
                "type": "paragraph",
                "attrs": { "textAlign": "left" },
                "content": [
                    { "type": "text", "text": "Start writing your email here." }
                ]
            },
            {
                "type": "button",
                "attrs": {
                    "text": "Get started",
                    "url": "",
                    "alignment": "left",
                    "variant": "filled",
                    "borderRadius": "smooth"
                }
            },
            {
                "type": "footer",
                "attrs": { "textAlign": "left" },
                "content": [
                    { "type": "text", "text": "You are receiving this email because you signed up." }
                ]
            }
        ]
    })
}

/// The default document in its serialized form.
#[must_use]
pub fn default_document_string() -> String {
    serialize_document(&default_document())
}

/// Parse a serialized document.
///
/// # Errors
///
/// Returns [`DocumentError::Empty`] for blank input and
/// [`DocumentError::Malformed`] when the input is not valid JSON.
pub fn parse_document(raw: &str) -> Result<Document, DocumentError> {
    if raw.trim().is_empty() {
        return Err(DocumentError::Empty);
    }
    Ok(serde_json::from_str(raw)?)
}

/// Serialize a document to compact JSON.
#[must_use]
pub fn serialize_document(document: &Document) -> String {
    document.to_string()
}
