//! Template model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Unique identifier for a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub i64);

impl TemplateId {
    /// Create a new template ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the user owning a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Create a new user ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A template as stored in the `mails` table.
///
/// `title`, `preview_text` and `content` are the legacy single-language
/// fields kept for templates created before bilingual support. They mirror
/// the English variant unless explicitly overridden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTemplate {
    /// Unique identifier.
    pub id: TemplateId,
    /// Owning user.
    pub user_id: UserId,
    /// Legacy subject line.
    pub title: String,
    /// English subject line.
    #[serde(default)]
    pub title_en: Option<String>,
    /// Japanese subject line.
    #[serde(default)]
    pub title_ja: Option<String>,
    /// Legacy preview text.
    #[serde(default)]
    pub preview_text: Option<String>,
    /// English preview text.
    #[serde(default)]
    pub preview_text_en: Option<String>,
    /// Japanese preview text.
    #[serde(default)]
    pub preview_text_ja: Option<String>,
    /// Legacy serialized document.
    pub content: String,
    /// English serialized document.
    #[serde(default)]
    pub content_en: Option<String>,
    /// Japanese serialized document.
    #[serde(default)]
    pub content_ja: Option<String>,
    /// When the template was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the template was last modified.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PersistedTemplate {
    /// Per-language subject line, if stored.
    #[must_use]
    pub fn localized_title(&self, language: Language) -> Option<&str> {
        match language {
            Language::En => self.title_en.as_deref(),
            Language::Ja => self.title_ja.as_deref(),
        }
    }

    /// Per-language preview text, if stored.
    #[must_use]
    pub fn localized_preview_text(&self, language: Language) -> Option<&str> {
        match language {
            Language::En => self.preview_text_en.as_deref(),
            Language::Ja => self.preview_text_ja.as_deref(),
        }
    }

    /// Per-language serialized document, if stored.
    #[must_use]
    pub fn localized_content(&self, language: Language) -> Option<&str> {
        match language {
            Language::En => self.content_en.as_deref(),
            Language::Ja => self.content_ja.as_deref(),
        }
    }
}

/// Body of the create and update template requests.
///
/// Optional fields that are `None` are omitted from the JSON body, which the
/// update endpoint treats as "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePayload {
    /// Legacy subject line.
    pub title: String,
    /// Legacy preview text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_text: Option<String>,
    /// Legacy serialized document.
    pub content: String,
    /// English subject line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    /// Japanese subject line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ja: Option<String>,
    /// English preview text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_text_en: Option<String>,
    /// Japanese preview text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_text_ja: Option<String>,
    /// English serialized document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_en: Option<String>,
    /// Japanese serialized document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_ja: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_omits_absent_fields() {
        let payload = TemplatePayload {
            title: "Hello".to_string(),
            content: "{}".to_string(),
            content_ja: Some("{}".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&payload).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("contentJa"));
        assert!(!object.contains_key("contentEn"));
        assert!(!object.contains_key("previewText"));
    }

    #[test]
    fn test_template_deserializes_without_localized_fields() {
        let json = r#"{
            "id": 7,
            "user_id": "user-1",
            "title": "Legacy",
            "preview_text": null,
            "content": "{}"
        }"#;

        let template: PersistedTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.id, TemplateId::new(7));
        assert_eq!(template.localized_title(Language::En), None);
        assert_eq!(template.localized_content(Language::Ja), None);
    }
}
