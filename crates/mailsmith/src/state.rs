//! The template editor state machine.

use std::collections::VecDeque;

use mailsmith_client::{PreviewRequest, TransportError};
use mailsmith_core::{Document, Language, PersistedTemplate, TemplateId, serialize_document};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::command::{Command, CommandState, CommandStates, test_email_request, validate_persist};
use crate::editor::{EditableDocument, EditorBinding, display_document};
use crate::effect::{Effect, HostEffect, Request};
use crate::message::Message;
use crate::model::{DraftField, DraftStore};
use crate::notice::Notice;
use crate::reconcile::{create_payload, update_payload};
use crate::renderer::{RenderOutcome, Renderer};

/// Editor state for one template, in create or edit mode.
///
/// Owns the drafts, the widget binding and the preview. Not `Send`: it holds
/// the widget and lives on the host's task.
#[derive(Debug)]
pub struct TemplateEditor {
    drafts: DraftStore,
    binding: EditorBinding,
    renderer: Renderer,
    commands: CommandStates,
    template_id: Option<TemplateId>,
    notices: VecDeque<Notice>,
    notifier: UnboundedSender<Message>,
}

impl TemplateEditor {
    /// Creates an editor over `drafts`. Widget notifications are posted on
    /// `notifier`.
    #[must_use]
    pub fn new(drafts: DraftStore, notifier: UnboundedSender<Message>) -> Self {
        Self {
            drafts,
            binding: EditorBinding::new(),
            renderer: Renderer::new(),
            commands: CommandStates::default(),
            template_id: None,
            notices: VecDeque::new(),
            notifier,
        }
    }

    /// Editor for a new template.
    #[must_use]
    pub fn create(active: Language, notifier: UnboundedSender<Message>) -> Self {
        Self::new(DraftStore::new(active), notifier)
    }

    /// Editor for an existing template.
    #[must_use]
    pub fn edit(
        template: &PersistedTemplate,
        active: Language,
        notifier: UnboundedSender<Message>,
    ) -> Self {
        let mut editor = Self::new(DraftStore::from_template(template, active), notifier);
        editor.template_id = Some(template.id);
        editor
    }

    /// Mounts a widget for the current generation and shows the active
    /// draft in it.
    pub fn mount_editor(&mut self, widget: Box<dyn EditableDocument>) -> Vec<Effect> {
        self.binding.attach(widget, &self.notifier);
        self.binding.load(&self.drafts.current().content);
        self.render_request().into_iter().collect()
    }

    /// Applies `message` and returns the effects it requires.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        match message {
            Message::SwitchLanguage(language) => return self.switch_language(language),
            Message::SetDraftField(field, value) => {
                self.drafts.current_mut().set_field(field, value);
                match field {
                    DraftField::Subject => {}
                    DraftField::PreviewText => {
                        return self.render_request().into_iter().collect();
                    }
                    DraftField::Content => {
                        self.binding.load(&self.drafts.current().content);
                        return self.render_request().into_iter().collect();
                    }
                }
            }
            Message::SetRecipient(field, value) => {
                self.drafts.recipients_mut().set_field(field, value);
            }
            Message::ShowReplyTo => self.drafts.recipients_mut().show_reply_to(),
            Message::HideReplyTo => self.drafts.recipients_mut().hide_reply_to(),
            Message::DocumentChanged { generation } => {
                if !self.binding.is_current(generation) {
                    debug!(
                        "Ignoring change from generation {} (current {})",
                        generation,
                        self.binding.generation()
                    );
                    return Vec::new();
                }
                self.commit_live_document();
                return self.render_request().into_iter().collect();
            }
            Message::Save => return self.save(),
            Message::Update => return self.update_template(),
            Message::SendTest => return self.send_test(),
            Message::Delete => return self.delete(),
            Message::TemplateCreated(result) => return self.template_created(result),
            Message::TemplateUpdated(result) => {
                self.commands.finish(Command::Update);
                match result {
                    Ok(()) => {
                        info!("Template updated");
                        self.notify(Notice::success("Template has been updated"));
                    }
                    Err(e) => self.notify_failure(&e, "Failed to update email"),
                }
                return vec![Effect::Host(HostEffect::Revalidate)];
            }
            Message::TemplateDeleted(result) => {
                self.commands.finish(Command::Delete);
                match result {
                    Ok(()) => {
                        info!("Template deleted");
                        self.notify(Notice::success("Template has been deleted"));
                        return vec![Effect::Host(HostEffect::CloseTemplate)];
                    }
                    Err(e) => self.notify_failure(&e, "Failed to delete template"),
                }
            }
            Message::PreviewRendered { token, result } => {
                if self.renderer.complete(token, result) == RenderOutcome::Failed {
                    self.notify(Notice::error("Failed to generate HTML preview"));
                }
            }
            Message::TestEmailSent(result) => {
                self.commands.finish(Command::SendTest);
                match result {
                    Ok(()) => self.notify(Notice::success("Test Email has been sent")),
                    Err(e) => self.notify_failure(&e, "Failed to send test email"),
                }
            }
        }
        Vec::new()
    }

    fn switch_language(&mut self, language: Language) -> Vec<Effect> {
        if language == self.drafts.active() {
            return Vec::new();
        }

        self.commit_live_document();
        self.drafts.set_active(language);
        let generation = self.binding.remount();
        debug!("Switched to {} (generation {})", language.label(), generation);

        vec![Effect::Host(HostEffect::RemountEditor {
            generation,
            content: display_document(&self.drafts.current().content),
        })]
    }

    /// Writes the live document into the active draft if the user changed it.
    fn commit_live_document(&mut self) {
        if let Some(document) = self.binding.take_divergence() {
            debug!("Committing live document to {} draft", self.drafts.active());
            self.drafts.current_mut().content = serialize_document(&document);
        }
    }

    fn render_request(&mut self) -> Option<Effect> {
        let live = self.binding.live_document()?;
        let token = self.renderer.begin();
        Some(Effect::Request(Request::RenderPreview {
            token,
            request: PreviewRequest {
                content: serialize_document(&live),
                preview_text: self.drafts.current().preview_text.clone(),
            },
        }))
    }

    /// Live document, validated for save/update. Pushes a notice on failure.
    fn persistable_document(&mut self) -> Option<String> {
        let live = self.binding.live_document();
        match validate_persist(&self.drafts.current().subject, live.as_ref()) {
            Ok(()) => live.as_ref().map(serialize_document),
            Err(e) => {
                debug!("Persist refused: {}", e);
                self.notify(Notice::error(e.to_string()));
                None
            }
        }
    }

    fn save(&mut self) -> Vec<Effect> {
        if self.template_id.is_some() || self.commands.is_pending(Command::Save) {
            return Vec::new();
        }
        let Some(live) = self.persistable_document() else {
            return Vec::new();
        };

        self.commands.start(Command::Save);
        vec![Effect::Request(Request::CreateTemplate(create_payload(
            &self.drafts,
            &live,
        )))]
    }

    fn update_template(&mut self) -> Vec<Effect> {
        let Some(id) = self.template_id else {
            return Vec::new();
        };
        if self.commands.is_pending(Command::Update) {
            return Vec::new();
        }
        let Some(live) = self.persistable_document() else {
            return Vec::new();
        };

        self.commands.start(Command::Update);
        vec![Effect::Request(Request::UpdateTemplate {
            id,
            payload: update_payload(&self.drafts, &live),
        })]
    }

    fn send_test(&mut self) -> Vec<Effect> {
        if self.commands.is_pending(Command::SendTest) {
            return Vec::new();
        }

        let live = self.binding.live_document();
        match test_email_request(&self.drafts, live.as_ref()) {
            Ok(request) => {
                self.commands.start(Command::SendTest);
                vec![Effect::Request(Request::SendTestEmail(request))]
            }
            Err(e) => {
                self.notify(Notice::error(e.to_string()));
                Vec::new()
            }
        }
    }

    fn delete(&mut self) -> Vec<Effect> {
        let Some(id) = self.template_id else {
            return Vec::new();
        };
        if self.commands.is_pending(Command::Delete) {
            return Vec::new();
        }

        self.commands.start(Command::Delete);
        vec![Effect::Request(Request::DeleteTemplate(id))]
    }

    fn template_created(
        &mut self,
        result: Result<PersistedTemplate, TransportError>,
    ) -> Vec<Effect> {
        self.commands.finish(Command::Save);
        match result {
            Ok(template) => {
                info!("Template {} created", template.id);
                self.template_id = Some(template.id);
                self.notify(Notice::success("Template has been saved"));
                vec![Effect::Host(HostEffect::OpenTemplate(template.id))]
            }
            Err(e) => {
                self.notify_failure(&e, "Failed to save email");
                Vec::new()
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    fn notify_failure(&mut self, error: &TransportError, fallback: &str) {
        warn!("{}: {}", fallback, error);
        self.notify(Notice::error(error.user_message(fallback)));
    }

    /// The drafts.
    #[must_use]
    pub const fn drafts(&self) -> &DraftStore {
        &self.drafts
    }

    /// The active language.
    #[must_use]
    pub const fn active_language(&self) -> Language {
        self.drafts.active()
    }

    /// Current widget mount generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.binding.generation()
    }

    /// Returns true while a widget is mounted.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.binding.is_mounted()
    }

    /// Snapshot of the live document.
    #[must_use]
    pub fn live_document(&self) -> Option<Document> {
        self.binding.live_document()
    }

    /// The open template, if saved.
    #[must_use]
    pub const fn template_id(&self) -> Option<TemplateId> {
        self.template_id
    }

    /// The preview state.
    #[must_use]
    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// The displayed preview HTML.
    #[must_use]
    pub fn html(&self) -> &str {
        self.renderer.html()
    }

    /// State of `command`.
    #[must_use]
    pub const fn command_state(&self, command: Command) -> CommandState {
        self.commands.get(command)
    }

    /// Drains queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}
