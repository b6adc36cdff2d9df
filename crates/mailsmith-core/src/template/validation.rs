//! Template payload validation.

use super::model::TemplatePayload;

/// Minimum number of characters in a trimmed subject line.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Validation error for a template payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Subject line is shorter than [`MIN_TITLE_LENGTH`] after trimming.
    TitleTooShort,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::TitleTooShort => "Subject must be at least 3 characters",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::TitleTooShort => "title",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating a payload.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Trim every text field of a payload.
///
/// Serialized documents are left untouched.
#[must_use]
pub fn normalize_payload(payload: TemplatePayload) -> TemplatePayload {
    fn trimmed(value: Option<String>) -> Option<String> {
        value.map(|v| v.trim().to_string())
    }

    TemplatePayload {
        title: payload.title.trim().to_string(),
        preview_text: trimmed(payload.preview_text),
        content: payload.content,
        title_en: trimmed(payload.title_en),
        title_ja: trimmed(payload.title_ja),
        preview_text_en: trimmed(payload.preview_text_en),
        preview_text_ja: trimmed(payload.preview_text_ja),
        content_en: payload.content_en,
        content_ja: payload.content_ja,
    }
}

/// Validate a template payload.
///
/// Returns `Ok(())` if valid, or `Err(Vec<ValidationError>)` with all errors.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_payload(payload: &TemplatePayload) -> ValidationResult {
    let mut errors = Vec::new();

    // Counted in characters so Japanese subjects are measured fairly
    if payload.title.trim().chars().count() < MIN_TITLE_LENGTH {
        errors.push(ValidationError::TitleTooShort);
    }

    // Content may be empty; update leaves the stored value alone then.

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
