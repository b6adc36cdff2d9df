//! The template API seam.

use std::future::Future;

use mailsmith_core::{PersistedTemplate, TemplateId, TemplatePayload};

use crate::error::Result;
use crate::types::{PreviewRequest, SendEmailRequest};

/// Remote operations the editor depends on.
///
/// [`crate::ApiClient`] is the HTTP implementation; tests and embedders may
/// supply their own. Uses RPITIT so implementations can be plain `async fn`s
/// while the futures stay `Send` for spawning.
pub trait TemplateApi: Send + Sync {
    /// `POST templates`: create a template, returning the stored record.
    fn create_template(
        &self,
        payload: &TemplatePayload,
    ) -> impl Future<Output = Result<PersistedTemplate>> + Send;

    /// `POST templates/{id}`: update the supplied fields of a template.
    fn update_template(
        &self,
        id: TemplateId,
        payload: &TemplatePayload,
    ) -> impl Future<Output = Result<()>> + Send;

    /// `DELETE templates/{id}`.
    fn delete_template(&self, id: TemplateId) -> impl Future<Output = Result<()>> + Send;

    /// `POST emails/preview`: render a document to email HTML.
    fn render_preview(
        &self,
        request: &PreviewRequest,
    ) -> impl Future<Output = Result<String>> + Send;

    /// `POST emails/send`: send a test email.
    fn send_email(&self, request: &SendEmailRequest) -> impl Future<Output = Result<()>> + Send;
}
