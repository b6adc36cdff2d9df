//! Per-language drafts and the transient editor form state.

use mailsmith_core::{Language, PersistedTemplate, default_document_string};

use super::fallback::FallbackChain;

/// Editable text field of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    /// Email subject (persisted as the title).
    Subject,
    /// Inbox preview text.
    PreviewText,
    /// Serialized document.
    Content,
}

/// Sender/recipient field of the test-send form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipientField {
    /// From address.
    From,
    /// Recipient address(es).
    To,
    /// Reply-to address.
    ReplyTo,
}

/// Working copy of one language's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    /// Subject line; trimmed and validated on save.
    pub subject: String,
    /// Preview text; trimmed on save.
    pub preview_text: String,
    /// Serialized document. May hold a malformed string loaded from storage.
    pub content: String,
}

impl TemplateDraft {
    /// A draft for a new template: empty text, default document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subject: String::new(),
            preview_text: String::new(),
            content: default_document_string(),
        }
    }

    /// Initial draft for `language` from a stored template.
    ///
    /// English falls back to the legacy single-language fields; Japanese
    /// goes straight to defaults.
    #[must_use]
    pub fn from_template(template: &PersistedTemplate, language: Language) -> Self {
        let legacy = matches!(language, Language::En);

        Self {
            subject: FallbackChain::new()
                .then(template.localized_title(language))
                .then(legacy.then_some(template.title.as_str()))
                .or_else(String::new),
            preview_text: FallbackChain::new()
                .then(template.localized_preview_text(language))
                .then(template.preview_text.as_deref().filter(|_| legacy))
                .or_else(String::new),
            content: FallbackChain::new()
                .then(template.localized_content(language))
                .then(legacy.then_some(template.content.as_str()))
                .or_else(default_document_string),
        }
    }

    /// Value of `field`.
    #[must_use]
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Subject => &self.subject,
            DraftField::PreviewText => &self.preview_text,
            DraftField::Content => &self.content,
        }
    }

    /// Replaces the value of `field`.
    pub fn set_field(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Subject => self.subject = value,
            DraftField::PreviewText => self.preview_text = value,
            DraftField::Content => self.content = value,
        }
    }
}

impl Default for TemplateDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Sender and recipients used for test sends. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipients {
    /// From address.
    pub from: String,
    /// Recipient address(es).
    pub to: String,
    /// Reply-to address; empty while hidden.
    pub reply_to: String,
    /// Whether the reply-to field is shown.
    pub reply_to_visible: bool,
}

impl Recipients {
    /// Value of `field`.
    #[must_use]
    pub fn field(&self, field: RecipientField) -> &str {
        match field {
            RecipientField::From => &self.from,
            RecipientField::To => &self.to,
            RecipientField::ReplyTo => &self.reply_to,
        }
    }

    /// Replaces the value of `field`.
    pub fn set_field(&mut self, field: RecipientField, value: String) {
        match field {
            RecipientField::From => self.from = value,
            RecipientField::To => self.to = value,
            RecipientField::ReplyTo => self.reply_to = value,
        }
    }

    /// Shows the reply-to field.
    pub const fn show_reply_to(&mut self) {
        self.reply_to_visible = true;
    }

    /// Hides the reply-to field and clears its value.
    pub fn hide_reply_to(&mut self) {
        self.reply_to.clear();
        self.reply_to_visible = false;
    }
}

/// Both language drafts plus the active-language selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftStore {
    en: TemplateDraft,
    ja: TemplateDraft,
    active: Language,
    recipients: Recipients,
}

impl DraftStore {
    /// Drafts for a new template.
    #[must_use]
    pub fn new(active: Language) -> Self {
        Self {
            en: TemplateDraft::new(),
            ja: TemplateDraft::new(),
            active,
            recipients: Recipients::default(),
        }
    }

    /// Drafts initialised from a stored template.
    #[must_use]
    pub fn from_template(template: &PersistedTemplate, active: Language) -> Self {
        Self {
            en: TemplateDraft::from_template(template, Language::En),
            ja: TemplateDraft::from_template(template, Language::Ja),
            active,
            recipients: Recipients::default(),
        }
    }

    /// The active language.
    #[must_use]
    pub const fn active(&self) -> Language {
        self.active
    }

    /// Selects the active language. Does not touch either draft.
    pub const fn set_active(&mut self, language: Language) {
        self.active = language;
    }

    /// Draft for `language`.
    #[must_use]
    pub const fn draft(&self, language: Language) -> &TemplateDraft {
        match language {
            Language::En => &self.en,
            Language::Ja => &self.ja,
        }
    }

    /// Mutable draft for `language`.
    pub const fn draft_mut(&mut self, language: Language) -> &mut TemplateDraft {
        match language {
            Language::En => &mut self.en,
            Language::Ja => &mut self.ja,
        }
    }

    /// Draft for the active language.
    #[must_use]
    pub const fn current(&self) -> &TemplateDraft {
        self.draft(self.active)
    }

    /// Mutable draft for the active language.
    pub const fn current_mut(&mut self) -> &mut TemplateDraft {
        self.draft_mut(self.active)
    }

    /// Value of `field` in the draft for `language`.
    #[must_use]
    pub fn field(&self, language: Language, field: DraftField) -> &str {
        self.draft(language).field(field)
    }

    /// Replaces `field` in the draft for `language`.
    pub fn set_field(&mut self, language: Language, field: DraftField, value: String) {
        self.draft_mut(language).set_field(field, value);
    }

    /// Test-send sender and recipients.
    #[must_use]
    pub const fn recipients(&self) -> &Recipients {
        &self.recipients
    }

    /// Mutable test-send sender and recipients.
    pub const fn recipients_mut(&mut self) -> &mut Recipients {
        &mut self.recipients
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new(Language::default())
    }
}
