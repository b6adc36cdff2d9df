//! Drives a [`TemplateEditor`] against a [`TemplateApi`].
//!
//! Requests run concurrently on a `JoinSet` and may finish in any order.
//! Their completions and widget notifications are applied to the editor one
//! at a time.

use std::sync::Arc;

use mailsmith_client::{TemplateApi, TransportError};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinSet;
use tracing::warn;

use crate::editor::EditableDocument;
use crate::effect::{Effect, HostEffect, Request};
use crate::message::Message;
use crate::model::DraftStore;
use crate::state::TemplateEditor;

/// Runs editor effects and feeds their results back as messages.
pub struct EditorRuntime<A: TemplateApi + 'static> {
    editor: TemplateEditor,
    api: Arc<A>,
    tasks: JoinSet<Message>,
    notifications: UnboundedReceiver<Message>,
}

impl<A: TemplateApi + 'static> EditorRuntime<A> {
    /// Creates a runtime for an editor over `drafts`.
    #[must_use]
    pub fn new(api: A, drafts: DraftStore) -> Self {
        Self::with_editor(api, |notifier| TemplateEditor::new(drafts, notifier))
    }

    /// Creates a runtime for an editor built by `build`, which receives the
    /// sender for widget notifications.
    pub fn with_editor(
        api: A,
        build: impl FnOnce(UnboundedSender<Message>) -> TemplateEditor,
    ) -> Self {
        let (notifier, notifications) = unbounded_channel();
        Self {
            editor: build(notifier),
            api: Arc::new(api),
            tasks: JoinSet::new(),
            notifications,
        }
    }

    /// The editor.
    #[must_use]
    pub const fn editor(&self) -> &TemplateEditor {
        &self.editor
    }

    /// The editor, mutably.
    pub const fn editor_mut(&mut self) -> &mut TemplateEditor {
        &mut self.editor
    }

    /// Returns true while requests are outstanding.
    #[must_use]
    pub fn has_pending_requests(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Mounts a widget and starts the initial preview render.
    pub fn mount(&mut self, widget: Box<dyn EditableDocument>) -> Vec<HostEffect> {
        let effects = self.editor.mount_editor(widget);
        self.perform(effects)
    }

    /// Applies `message`, spawning any requests it produces.
    pub fn dispatch(&mut self, message: Message) -> Vec<HostEffect> {
        let effects = self.editor.update(message);
        self.perform(effects)
    }

    /// Waits for the next notification or request completion and applies it.
    ///
    /// Returns immediately with no effects when nothing is queued and no
    /// request is outstanding.
    pub async fn next(&mut self) -> Vec<HostEffect> {
        if self.tasks.is_empty() {
            return match self.notifications.try_recv() {
                Ok(message) => self.dispatch(message),
                Err(_) => Vec::new(),
            };
        }

        let message = tokio::select! {
            Some(message) = self.notifications.recv() => message,
            Some(joined) = self.tasks.join_next() => match joined {
                Ok(message) => message,
                Err(e) => {
                    warn!("Request task failed: {}", e);
                    return Vec::new();
                }
            },
        };
        self.dispatch(message)
    }

    /// Applies queued notifications and waits for every outstanding request.
    pub async fn settle(&mut self) -> Vec<HostEffect> {
        let mut host = Vec::new();
        loop {
            while let Ok(message) = self.notifications.try_recv() {
                host.extend(self.dispatch(message));
            }

            match self.tasks.join_next().await {
                Some(Ok(message)) => host.extend(self.dispatch(message)),
                Some(Err(e)) => warn!("Request task failed: {}", e),
                None => break,
            }
        }
        host
    }

    fn perform(&mut self, effects: Vec<Effect>) -> Vec<HostEffect> {
        let mut host = Vec::new();
        for effect in effects {
            match effect {
                Effect::Request(request) => self.spawn(request),
                Effect::Host(effect) => host.push(effect),
            }
        }
        host
    }

    fn spawn(&mut self, request: Request) {
        let api = Arc::clone(&self.api);
        match request {
            Request::CreateTemplate(payload) => {
                self.tasks.spawn(async move {
                    let result = api.create_template(&payload).await;
                    Message::TemplateCreated(result.map_err(TransportError::from))
                });
            }
            Request::UpdateTemplate { id, payload } => {
                self.tasks.spawn(async move {
                    let result = api.update_template(id, &payload).await;
                    Message::TemplateUpdated(result.map_err(TransportError::from))
                });
            }
            Request::DeleteTemplate(id) => {
                self.tasks.spawn(async move {
                    let result = api.delete_template(id).await;
                    Message::TemplateDeleted(result.map_err(TransportError::from))
                });
            }
            Request::RenderPreview { token, request } => {
                self.tasks.spawn(async move {
                    let result = api.render_preview(&request).await;
                    Message::PreviewRendered {
                        token,
                        result: result.map_err(TransportError::from),
                    }
                });
            }
            Request::SendTestEmail(request) => {
                self.tasks.spawn(async move {
                    let result = api.send_email(&request).await;
                    Message::TestEmailSent(result.map_err(TransportError::from))
                });
            }
        }
    }
}

impl<A: TemplateApi + 'static> std::fmt::Debug for EditorRuntime<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorRuntime")
            .field("editor", &self.editor)
            .field("pending_requests", &self.tasks.len())
            .finish_non_exhaustive()
    }
}
