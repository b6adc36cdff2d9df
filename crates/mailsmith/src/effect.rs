//! Side effects requested by [`crate::TemplateEditor::update`].

use mailsmith_client::{PreviewRequest, SendEmailRequest};
use mailsmith_core::{Document, TemplateId, TemplatePayload};

use crate::renderer::RenderToken;

/// Something the editor needs done outside its own state.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// A remote call; its completion comes back as a [`crate::Message`].
    Request(Request),
    /// An instruction for the embedding host.
    Host(HostEffect),
}

/// Remote calls issued by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `POST templates`.
    CreateTemplate(TemplatePayload),
    /// `POST templates/{id}`.
    UpdateTemplate {
        /// Template to update.
        id: TemplateId,
        /// Fields to write.
        payload: TemplatePayload,
    },
    /// `DELETE templates/{id}`.
    DeleteTemplate(TemplateId),
    /// `POST emails/preview`.
    RenderPreview {
        /// Token to echo back with the result.
        token: RenderToken,
        /// Document and preview text to render.
        request: PreviewRequest,
    },
    /// `POST emails/send`.
    SendTestEmail(SendEmailRequest),
}

/// Instructions for the host that embeds the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEffect {
    /// Discard the widget and mount a fresh one showing `content`.
    RemountEditor {
        /// Generation the new widget belongs to.
        generation: u64,
        /// Document to initialise the widget with.
        content: Document,
    },
    /// A template was created; show it.
    OpenTemplate(TemplateId),
    /// Stored data may have changed; reload it.
    Revalidate,
    /// The open template was deleted; leave it.
    CloseTemplate,
}
