//! The boundary to the rich-text editing widget.
//!
//! The widget itself lives outside this crate. It is reached through
//! [`EditableDocument`] and owned by the [`EditorBinding`] for one mount
//! generation at a time.

mod binding;

use std::cell::RefCell;
use std::rc::Rc;

use mailsmith_core::Document;

pub use binding::{EditorBinding, display_document};

/// Handle returned by [`EditableDocument::on_document_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Callback invoked after the user edits the document.
pub type ChangeHandler = Box<dyn FnMut()>;

/// A rich-text widget bound to a structured document.
pub trait EditableDocument {
    /// Snapshot of the document the widget currently shows.
    fn current_document(&self) -> Document;

    /// Replaces the widget's document. Does not fire change handlers.
    fn set_content(&mut self, document: &Document);

    /// Registers a handler fired after every user edit.
    fn on_document_changed(&mut self, handler: ChangeHandler) -> SubscriptionId;

    /// Removes a handler registered with [`Self::on_document_changed`].
    fn unsubscribe(&mut self, id: SubscriptionId);
}

/// A mounted widget together with its change subscription.
///
/// Dropping the session releases the subscription.
pub struct LiveSession {
    widget: Box<dyn EditableDocument>,
    subscription: Option<SubscriptionId>,
}

impl LiveSession {
    /// Wraps a widget whose change handler is registered as `subscription`.
    #[must_use]
    pub fn new(widget: Box<dyn EditableDocument>, subscription: SubscriptionId) -> Self {
        Self {
            widget,
            subscription: Some(subscription),
        }
    }

    /// The mounted widget.
    #[must_use]
    pub fn widget(&self) -> &dyn EditableDocument {
        self.widget.as_ref()
    }

    /// The mounted widget, mutably.
    pub fn widget_mut(&mut self) -> &mut dyn EditableDocument {
        self.widget.as_mut()
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.widget.unsubscribe(id);
        }
    }
}

impl std::fmt::Debug for LiveSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveSession")
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct MemoryState {
    document: Document,
    handlers: Vec<(SubscriptionId, ChangeHandler)>,
    next_subscription: u64,
    set_content_calls: usize,
}

/// In-memory [`EditableDocument`] for headless hosts and tests.
///
/// Clones share the same document, so a host can keep one handle to drive
/// edits while the binding owns another.
#[derive(Clone, Default)]
pub struct MemoryDocument {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryDocument {
    /// Creates a widget showing `document`.
    #[must_use]
    pub fn new(document: Document) -> Self {
        let widget = Self::default();
        widget.state.borrow_mut().document = document;
        widget
    }

    /// Applies a user edit and fires the change handlers.
    pub fn edit(&self, document: Document) {
        let mut handlers = {
            let mut state = self.state.borrow_mut();
            state.document = document;
            std::mem::take(&mut state.handlers)
        };

        for (_, handler) in &mut handlers {
            handler();
        }

        // Handlers registered while firing are kept after the existing ones.
        let mut state = self.state.borrow_mut();
        handlers.append(&mut state.handlers);
        state.handlers = handlers;
    }

    /// The document currently shown.
    #[must_use]
    pub fn document(&self) -> Document {
        self.state.borrow().document.clone()
    }

    /// Number of programmatic [`EditableDocument::set_content`] calls.
    #[must_use]
    pub fn set_content_calls(&self) -> usize {
        self.state.borrow().set_content_calls
    }

    /// Number of registered change handlers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().handlers.len()
    }
}

impl EditableDocument for MemoryDocument {
    fn current_document(&self) -> Document {
        self.document()
    }

    fn set_content(&mut self, document: &Document) {
        let mut state = self.state.borrow_mut();
        state.document = document.clone();
        state.set_content_calls += 1;
    }

    fn on_document_changed(&mut self, handler: ChangeHandler) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        state.next_subscription += 1;
        let id = SubscriptionId(state.next_subscription);
        state.handlers.push((id, handler));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.state
            .borrow_mut()
            .handlers
            .retain(|(existing, _)| *existing != id);
    }
}

impl std::fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryDocument")
            .field("document", &self.state.borrow().document)
            .finish_non_exhaustive()
    }
}
