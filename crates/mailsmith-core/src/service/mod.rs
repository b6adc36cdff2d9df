//! Core services for template operations.
//!
//! This module provides the service layer behind the template HTTP
//! endpoints: session checks, payload validation and storage, mapped to the
//! wire-level status codes and error bodies the editor client understands.

mod template;

pub use template::{ApiErrorBody, ServiceError, StatusAck, TemplateEnvelope, TemplateService};
