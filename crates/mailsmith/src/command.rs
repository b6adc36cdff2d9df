//! Command validation and per-command pending state.

use mailsmith_client::SendEmailRequest;
use mailsmith_core::{Document, MIN_TITLE_LENGTH, serialize_document};

use crate::model::DraftStore;

/// Why a command was refused before any request was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Subject or document missing.
    #[error("Subject, Preview Text and Content are required")]
    MissingFields,
    /// Subject shorter than the minimum.
    #[error("Subject must be at least 3 characters")]
    SubjectTooShort,
    /// No live document to send.
    #[error("Editor content is empty")]
    EmptyDocument,
}

/// Checks a save or update before building its payload.
///
/// # Errors
///
/// Returns [`CommandError::MissingFields`] if the trimmed subject is empty or
/// there is no live document, and [`CommandError::SubjectTooShort`] if the
/// trimmed subject has fewer than three characters.
pub fn validate_persist(subject: &str, live: Option<&Document>) -> Result<(), CommandError> {
    let subject = subject.trim();
    if subject.is_empty() || live.is_none() {
        return Err(CommandError::MissingFields);
    }
    if subject.chars().count() < MIN_TITLE_LENGTH {
        return Err(CommandError::SubjectTooShort);
    }
    Ok(())
}

/// Builds a test-send request from the active draft and the live document.
///
/// # Errors
///
/// Returns [`CommandError::EmptyDocument`] if there is no live document.
pub fn test_email_request(
    drafts: &DraftStore,
    live: Option<&Document>,
) -> Result<SendEmailRequest, CommandError> {
    let live = live.ok_or(CommandError::EmptyDocument)?;
    let current = drafts.current();
    let recipients = drafts.recipients();

    Ok(SendEmailRequest {
        subject: current.subject.clone(),
        preview_text: current.preview_text.clone(),
        from: recipients.from.clone(),
        to: recipients.to.clone(),
        reply_to: recipients.reply_to.clone(),
        content: serialize_document(live),
    })
}

/// User command guarded by a pending flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Create a template.
    Save,
    /// Update the open template.
    Update,
    /// Send a test email.
    SendTest,
    /// Delete the open template.
    Delete,
}

/// Whether a command has a request outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandState {
    /// Ready to run.
    #[default]
    Idle,
    /// Waiting for a response; new invocations are ignored.
    Pending,
}

/// Independent state for each [`Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandStates {
    save: CommandState,
    update: CommandState,
    send_test: CommandState,
    delete: CommandState,
}

impl CommandStates {
    /// State of `command`.
    #[must_use]
    pub const fn get(&self, command: Command) -> CommandState {
        match command {
            Command::Save => self.save,
            Command::Update => self.update,
            Command::SendTest => self.send_test,
            Command::Delete => self.delete,
        }
    }

    /// Returns true if `command` is pending.
    #[must_use]
    pub fn is_pending(&self, command: Command) -> bool {
        self.get(command) == CommandState::Pending
    }

    /// Marks `command` pending.
    pub const fn start(&mut self, command: Command) {
        *self.slot(command) = CommandState::Pending;
    }

    /// Marks `command` idle.
    pub const fn finish(&mut self, command: Command) {
        *self.slot(command) = CommandState::Idle;
    }

    const fn slot(&mut self, command: Command) -> &mut CommandState {
        match command {
            Command::Save => &mut self.save,
            Command::Update => &mut self.update,
            Command::SendTest => &mut self.send_test,
            Command::Delete => &mut self.delete,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::RecipientField;
    use mailsmith_core::{Language, default_document};

    #[test]
    fn test_subject_rules() {
        let live = default_document();
        assert_eq!(validate_persist("", Some(&live)), Err(CommandError::MissingFields));
        assert_eq!(validate_persist("   ", Some(&live)), Err(CommandError::MissingFields));
        assert_eq!(validate_persist("a", Some(&live)), Err(CommandError::SubjectTooShort));
        assert_eq!(validate_persist(" ab ", Some(&live)), Err(CommandError::SubjectTooShort));
        assert_eq!(validate_persist("abc", Some(&live)), Ok(()));
        assert_eq!(validate_persist("件名です", Some(&live)), Ok(()));
    }

    #[test]
    fn test_missing_live_document() {
        assert_eq!(validate_persist("Welcome", None), Err(CommandError::MissingFields));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CommandError::MissingFields.to_string(),
            "Subject, Preview Text and Content are required"
        );
        assert_eq!(
            CommandError::SubjectTooShort.to_string(),
            "Subject must be at least 3 characters"
        );
        assert_eq!(CommandError::EmptyDocument.to_string(), "Editor content is empty");
    }

    #[test]
    fn test_email_request_uses_active_draft() {
        let mut drafts = DraftStore::new(Language::Ja);
        drafts.current_mut().subject = "件名".to_string();
        drafts.current_mut().preview_text = "プレビュー".to_string();
        drafts
            .recipients_mut()
            .set_field(RecipientField::To, "a@example.com".to_string());

        let live = default_document();
        let request = test_email_request(&drafts, Some(&live)).unwrap();
        assert_eq!(request.subject, "件名");
        assert_eq!(request.preview_text, "プレビュー");
        assert_eq!(request.to, "a@example.com");
        assert_eq!(request.content, serialize_document(&live));
    }

    #[test]
    fn test_email_request_without_document() {
        let drafts = DraftStore::default();
        assert_eq!(
            test_email_request(&drafts, None),
            Err(CommandError::EmptyDocument)
        );
    }

    #[test]
    fn test_states_are_independent() {
        let mut states = CommandStates::default();
        states.start(Command::Save);
        assert!(states.is_pending(Command::Save));
        assert!(!states.is_pending(Command::SendTest));

        states.finish(Command::Save);
        assert_eq!(states.get(Command::Save), CommandState::Idle);
    }
}
