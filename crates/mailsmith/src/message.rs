//! Message types for editor events.
//!
//! Messages are the only way editor state changes: user input, widget
//! notifications and request completions all arrive as a [`Message`].

use mailsmith_client::TransportError;
use mailsmith_core::{Language, PersistedTemplate};

use crate::model::{DraftField, RecipientField};
use crate::renderer::RenderToken;

/// Editor messages (events).
#[derive(Debug, Clone)]
pub enum Message {
    // Drafts
    /// Switch the active language, flushing the live document first.
    SwitchLanguage(Language),
    /// A field of the active draft changed.
    SetDraftField(DraftField, String),
    /// A test-send field changed.
    SetRecipient(RecipientField, String),
    /// Show the reply-to field.
    ShowReplyTo,
    /// Hide and clear the reply-to field.
    HideReplyTo,

    // Widget
    /// The widget mounted under `generation` reported a user edit.
    DocumentChanged {
        /// Mount generation the notification was registered under.
        generation: u64,
    },

    // Commands
    /// Create the template.
    Save,
    /// Update the open template.
    Update,
    /// Send a test email.
    SendTest,
    /// Delete the open template.
    Delete,

    // Completions
    /// Create finished.
    TemplateCreated(Result<PersistedTemplate, TransportError>),
    /// Update finished.
    TemplateUpdated(Result<(), TransportError>),
    /// Delete finished.
    TemplateDeleted(Result<(), TransportError>),
    /// Preview render finished.
    PreviewRendered {
        /// Token issued with the request.
        token: RenderToken,
        /// Rendered HTML.
        result: Result<String, TransportError>,
    },
    /// Test send finished.
    TestEmailSent(Result<(), TransportError>),
}
