//! Builds create and update payloads from the two drafts and the live
//! document.
//!
//! The legacy `title`/`previewText`/`content` columns mirror the active
//! language; the per-language columns come from both drafts. Content is
//! handled differently for create and update:
//!
//! | Active | Operation | `content`              | `contentEn`            | `contentJa`            |
//! |--------|-----------|------------------------|------------------------|------------------------|
//! | en     | create    | live                   | live                   | ja draft or default    |
//! | ja     | create    | en draft or default    | en draft or default    | live                   |
//! | en     | update    | live                   | live                   | omitted                |
//! | ja     | update    | en draft or live       | omitted                | live                   |

use mailsmith_core::{Language, TemplatePayload, default_document_string};

use crate::model::DraftStore;

/// Payload for `POST templates`.
///
/// `live` is the serialized live document.
#[must_use]
pub fn create_payload(drafts: &DraftStore, live: &str) -> TemplatePayload {
    let base = text_fields(drafts);
    let stored_or_default = |language: Language| {
        let content = &drafts.draft(language).content;
        if content.is_empty() {
            default_document_string()
        } else {
            content.clone()
        }
    };

    match drafts.active() {
        Language::En => TemplatePayload {
            content: live.to_string(),
            content_en: Some(live.to_string()),
            content_ja: Some(stored_or_default(Language::Ja)),
            ..base
        },
        Language::Ja => {
            let english = stored_or_default(Language::En);
            TemplatePayload {
                content: english.clone(),
                content_en: Some(english),
                content_ja: Some(live.to_string()),
                ..base
            }
        }
    }
}

/// Payload for `POST templates/{id}`.
///
/// Only the active language's content column is sent.
#[must_use]
pub fn update_payload(drafts: &DraftStore, live: &str) -> TemplatePayload {
    let base = text_fields(drafts);

    match drafts.active() {
        Language::En => TemplatePayload {
            content: live.to_string(),
            content_en: Some(live.to_string()),
            ..base
        },
        Language::Ja => {
            let english = &drafts.draft(Language::En).content;
            TemplatePayload {
                content: if english.is_empty() {
                    live.to_string()
                } else {
                    english.clone()
                },
                content_ja: Some(live.to_string()),
                ..base
            }
        }
    }
}

fn text_fields(drafts: &DraftStore) -> TemplatePayload {
    let current = drafts.current();
    let en = drafts.draft(Language::En);
    let ja = drafts.draft(Language::Ja);

    TemplatePayload {
        title: current.subject.trim().to_string(),
        preview_text: Some(current.preview_text.trim().to_string()),
        title_en: Some(en.subject.trim().to_string()),
        title_ja: Some(ja.subject.trim().to_string()),
        preview_text_en: Some(en.preview_text.trim().to_string()),
        preview_text_ja: Some(ja.preview_text.trim().to_string()),
        ..TemplatePayload::default()
    }
}
