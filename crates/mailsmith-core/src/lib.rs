//! # mailsmith-core
//!
//! Core domain types and storage for the `Mailsmith` bilingual email template editor.
//!
//! This crate provides:
//! - Language selection (`en` / `ja`)
//! - The structured document model and its compiled-in default document
//! - Persisted template records with legacy and per-language fields
//! - Template payload validation
//! - Local storage (`SQLite`) for the `mails` table
//! - The authorization-scoped template service behind the HTTP endpoints

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod document;
mod error;
pub mod language;
pub mod service;
pub mod template;

pub use document::{
    Document, DocumentError, default_document, default_document_string, parse_document,
    serialize_document,
};
pub use error::{Error, Result};
pub use language::{Language, ParseLanguageError};
pub use service::{ApiErrorBody, ServiceError, StatusAck, TemplateEnvelope, TemplateService};
pub use template::{
    MIN_TITLE_LENGTH, PersistedTemplate, TemplateId, TemplatePayload, TemplateRepository, UserId,
    ValidationError, ValidationResult, normalize_payload, validate_payload,
};
