//! # mailsmith-client
//!
//! HTTP client for the `Mailsmith` template API.
//!
//! ## Endpoints
//!
//! - `POST templates`: create a template
//! - `POST templates/{id}`: update a template
//! - `DELETE templates/{id}`: delete a template
//! - `POST emails/preview`: render a document to HTML
//! - `POST emails/send`: send a test email
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailsmith_client::{ApiClient, PreviewRequest, TemplateApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("https://mail.example.com/api/v1")?
//!         .with_session_token("session");
//!
//!     let html = client
//!         .render_preview(&PreviewRequest {
//!             content: mailsmith_core::default_document_string(),
//!             preview_text: "Hello".to_string(),
//!         })
//!         .await?;
//!     println!("{html}");
//!     Ok(())
//! }
//! ```
//!
//! Failures surface as [`Error`]; UI state carries the cloneable
//! [`TransportError`] summary instead.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod api;
mod client;
pub mod config;
mod error;
pub mod types;

pub use api::TemplateApi;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{Error, Result, TransportError, TransportErrorKind};
pub use types::{PreviewRequest, PreviewResponse, SendEmailRequest};
