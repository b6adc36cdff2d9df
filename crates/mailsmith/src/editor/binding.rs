//! Two-way binding between the active draft and the mounted widget.

use mailsmith_core::{Document, default_document, parse_document};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace, warn};

use super::{EditableDocument, LiveSession};
use crate::message::Message;

/// Document to display for a draft's serialized content.
///
/// Content that does not parse is logged and replaced by the default
/// document. The draft itself is left untouched.
#[must_use]
pub fn display_document(content: &str) -> Document {
    match parse_document(content) {
        Ok(document) => document,
        Err(e) => {
            warn!("Draft content is not a valid document, showing default: {}", e);
            default_document()
        }
    }
}

/// Owns the live widget for the current mount generation.
///
/// `baseline` is the document last synchronised between draft and widget.
/// A live document equal to it carries no user edit and is never written
/// back, which keeps unparseable stored content intact.
#[derive(Debug, Default)]
pub struct EditorBinding {
    session: Option<LiveSession>,
    generation: u64,
    baseline: Option<Document>,
}

impl EditorBinding {
    /// Creates an unmounted binding at generation 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mount generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true if `generation` is the current one.
    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Returns true while a widget is mounted.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.session.is_some()
    }

    /// Snapshot of the live document, if a widget is mounted.
    #[must_use]
    pub fn live_document(&self) -> Option<Document> {
        self.session
            .as_ref()
            .map(|session| session.widget().current_document())
    }

    /// Mounts `widget` for the current generation.
    ///
    /// Every user edit posts [`Message::DocumentChanged`] tagged with this
    /// generation on `notifier`. A previously mounted widget is released.
    pub fn attach(
        &mut self,
        mut widget: Box<dyn EditableDocument>,
        notifier: &UnboundedSender<Message>,
    ) {
        self.detach();

        let generation = self.generation;
        let notifier = notifier.clone();
        let subscription = widget.on_document_changed(Box::new(move || {
            if notifier
                .send(Message::DocumentChanged { generation })
                .is_err()
            {
                trace!("Editor dropped, change notification discarded");
            }
        }));

        debug!("Editor mounted (generation {})", generation);
        self.session = Some(LiveSession::new(widget, subscription));
    }

    /// Releases the mounted widget and its subscription.
    pub fn detach(&mut self) {
        if self.session.take().is_some() {
            debug!("Editor detached (generation {})", self.generation);
        }
        self.baseline = None;
    }

    /// Releases the widget and starts a new generation.
    ///
    /// Notifications still queued from the old widget become stale.
    pub fn remount(&mut self) -> u64 {
        self.detach();
        self.generation += 1;
        self.generation
    }

    /// Shows `content` in the mounted widget.
    ///
    /// `set_content` is skipped when the widget already shows an equal
    /// document. The displayed document becomes the baseline.
    pub fn load(&mut self, content: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let target = display_document(content);
        if session.widget().current_document() == target {
            trace!("Widget already shows the draft, skipping set_content");
        } else {
            session.widget_mut().set_content(&target);
        }
        self.baseline = Some(target);
    }

    /// Returns the live document if it diverges from the baseline, making it
    /// the new baseline.
    pub fn take_divergence(&mut self) -> Option<Document> {
        let live = self.live_document()?;
        if self.baseline.as_ref() == Some(&live) {
            return None;
        }

        self.baseline = Some(live.clone());
        Some(live)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::editor::MemoryDocument;
    use mailsmith_core::serialize_document;
    use serde_json::json;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn test_malformed_content_displays_default() {
        assert_eq!(display_document("{not json"), default_document());
        assert_eq!(display_document(""), default_document());
    }

    #[test]
    fn test_load_skips_equal_document() {
        let (tx, _rx) = unbounded_channel();
        let document = json!({"type": "doc", "content": [{"type": "paragraph"}]});
        let widget = MemoryDocument::new(document.clone());
        let mut binding = EditorBinding::new();

        binding.attach(Box::new(widget.clone()), &tx);
        binding.load(&serialize_document(&document));

        assert_eq!(widget.set_content_calls(), 0);
        assert_eq!(binding.live_document(), Some(document));
    }

    #[test]
    fn test_load_sets_different_document() {
        let (tx, _rx) = unbounded_channel();
        let widget = MemoryDocument::default();
        let mut binding = EditorBinding::new();

        binding.attach(Box::new(widget.clone()), &tx);
        binding.load(r#"{"type":"doc"}"#);

        assert_eq!(widget.set_content_calls(), 1);
        assert_eq!(widget.document(), json!({"type": "doc"}));
    }

    #[test]
    fn test_echo_is_not_divergence() {
        let (tx, _rx) = unbounded_channel();
        let widget = MemoryDocument::default();
        let mut binding = EditorBinding::new();

        binding.attach(Box::new(widget.clone()), &tx);
        binding.load("not json");
        assert_eq!(binding.take_divergence(), None);

        widget.edit(json!({"type": "doc", "content": []}));
        assert_eq!(
            binding.take_divergence(),
            Some(json!({"type": "doc", "content": []}))
        );
        assert_eq!(binding.take_divergence(), None);
    }

    #[test]
    fn test_edits_post_generation_tagged_messages() {
        let (tx, mut rx) = unbounded_channel();
        let widget = MemoryDocument::default();
        let mut binding = EditorBinding::new();
        binding.remount();
        binding.attach(Box::new(widget.clone()), &tx);

        widget.edit(json!({}));
        let message = rx.try_recv().unwrap();
        assert!(matches!(message, Message::DocumentChanged { generation: 1 }));
    }

    #[test]
    fn test_remount_releases_widget() {
        let (tx, _rx) = unbounded_channel();
        let widget = MemoryDocument::default();
        let mut binding = EditorBinding::new();
        binding.attach(Box::new(widget.clone()), &tx);
        assert_eq!(widget.subscriber_count(), 1);

        assert_eq!(binding.remount(), 1);
        assert!(!binding.is_mounted());
        assert_eq!(widget.subscriber_count(), 0);
        assert!(!binding.is_current(0));
    }
}
