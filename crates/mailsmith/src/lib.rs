//! # mailsmith
//!
//! Bilingual (English/Japanese) email template editor core.
//!
//! The editor keeps one draft per language, binds the active draft to an
//! external rich-text widget, renders an HTML preview and reconciles both
//! drafts into create/update payloads.
//!
//! State changes go through [`TemplateEditor::update`], which returns
//! [`Effect`]s. [`EditorRuntime`] performs the remote ones against a
//! [`mailsmith_client::TemplateApi`] and hands the host the rest.
//!
//! ```ignore
//! use mailsmith::{DraftStore, EditorRuntime, HostEffect, MemoryDocument, Message};
//! use mailsmith_client::ApiClient;
//! use mailsmith_core::Language;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = mailsmith::EditorConfig::load().await?;
//!     mailsmith::init_logging(&config.log_filter)?;
//!
//!     let client = ApiClient::from_config(&config.api)?;
//!     let mut runtime = EditorRuntime::new(client, DraftStore::new(Language::En));
//!     runtime.mount(Box::new(MemoryDocument::default()));
//!
//!     for effect in runtime.dispatch(Message::SwitchLanguage(Language::Ja)) {
//!         if let HostEffect::RemountEditor { content, .. } = effect {
//!             runtime.mount(Box::new(MemoryDocument::new(content)));
//!         }
//!     }
//!     runtime.settle().await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod config;
pub mod editor;
pub mod effect;
mod error;
pub mod message;
pub mod model;
pub mod notice;
pub mod reconcile;
pub mod renderer;
mod runtime;
mod state;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use command::{Command, CommandError, CommandState};
pub use config::{DEFAULT_LOG_FILTER, EditorConfig};
pub use editor::{EditableDocument, EditorBinding, LiveSession, MemoryDocument, SubscriptionId};
pub use effect::{Effect, HostEffect, Request};
pub use error::{Error, Result};
pub use message::Message;
pub use model::{DraftField, DraftStore, RecipientField, Recipients, TemplateDraft};
pub use notice::{Notice, NoticeLevel};
pub use renderer::{RenderOutcome, RenderToken, Renderer};
pub use runtime::EditorRuntime;
pub use state::TemplateEditor;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(default_filter: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
