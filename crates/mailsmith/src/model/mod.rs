//! Draft state for the template editor.

mod draft;
mod fallback;

pub use draft::{DraftField, DraftStore, RecipientField, Recipients, TemplateDraft};
pub use fallback::FallbackChain;
