//! Template service.
//!
//! Implements the semantics of `POST /templates`, `POST /templates/{id}` and
//! `DELETE /templates/{id}` on top of [`TemplateRepository`].

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::Error;
use crate::template::{
    PersistedTemplate, TemplateId, TemplatePayload, TemplateRepository, UserId, ValidationError,
    normalize_payload, validate_payload,
};

/// Errors that can occur during template service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No authenticated session.
    #[error("Unauthorized")]
    Unauthorized,

    /// The request body failed validation.
    #[error("Invalid request: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// Template does not exist or belongs to another user.
    #[error("Template not found")]
    NotFound(TemplateId),

    /// Storage failed.
    #[error("Failed to {operation} template: {source}")]
    Storage {
        /// Operation that failed (`insert`, `update`, `delete`).
        operation: &'static str,
        /// Underlying error.
        source: Error,
    },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ServiceError {
    /// HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Storage { .. } => 500,
        }
    }

    /// Wire body for this error.
    ///
    /// Storage details are logged, not exposed.
    #[must_use]
    pub fn to_body(&self) -> ApiErrorBody {
        let (message, errors) = match self {
            Self::Unauthorized => ("Unauthorized".to_string(), vec!["Unauthorized".to_string()]),
            Self::Validation(errors) => (
                "Invalid request body".to_string(),
                errors.iter().map(|e| e.message().to_string()).collect(),
            ),
            Self::NotFound(_) => ("Template not found".to_string(), Vec::new()),
            Self::Storage { operation, .. } => {
                (format!("Failed to {operation} template"), Vec::new())
            }
        };

        ApiErrorBody {
            status: self.status(),
            message,
            errors,
        }
    }
}

/// Error body returned by the template and email endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// HTTP status code.
    pub status: u16,
    /// Human-readable message, suitable for showing to the user.
    pub message: String,
    /// Individual problems, if any.
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Plain acknowledgement body (`{"status": "ok"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusAck {
    /// Always `"ok"` on success.
    pub status: String,
}

impl StatusAck {
    /// The success acknowledgement.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Body returned by the create endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEnvelope {
    /// The newly created template.
    pub template: PersistedTemplate,
}

/// Authorization-scoped template operations.
pub struct TemplateService {
    repository: TemplateRepository,
}

impl TemplateService {
    /// Creates a service over a repository.
    #[must_use]
    pub const fn new(repository: TemplateRepository) -> Self {
        Self { repository }
    }

    /// The underlying repository.
    #[must_use]
    pub const fn repository(&self) -> &TemplateRepository {
        &self.repository
    }

    /// Create a template for the session user.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthorized`] without a session,
    /// [`ServiceError::Validation`] for an invalid payload and
    /// [`ServiceError::Storage`] if the insert fails.
    pub async fn create(
        &self,
        session: Option<&UserId>,
        payload: TemplatePayload,
    ) -> Result<TemplateEnvelope, ServiceError> {
        let user = session.ok_or(ServiceError::Unauthorized)?;
        let payload = checked(payload)?;

        let template = self
            .repository
            .create(user, &payload)
            .await
            .map_err(|source| storage_error("insert", source))?;

        info!("Template {} created", template.id);
        Ok(TemplateEnvelope { template })
    }

    /// Update a template owned by the session user.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthorized`] without a session,
    /// [`ServiceError::Validation`] for an invalid payload,
    /// [`ServiceError::NotFound`] if the user has no such template and
    /// [`ServiceError::Storage`] if the update fails.
    pub async fn update(
        &self,
        session: Option<&UserId>,
        id: TemplateId,
        payload: TemplatePayload,
    ) -> Result<StatusAck, ServiceError> {
        let user = session.ok_or(ServiceError::Unauthorized)?;
        let payload = checked(payload)?;

        match self.repository.update(user, id, &payload).await {
            Ok(()) => {
                info!("Template {id} updated");
                Ok(StatusAck::ok())
            }
            Err(Error::TemplateNotFound(id)) => Err(ServiceError::NotFound(id)),
            Err(source) => Err(storage_error("update", source)),
        }
    }

    /// Delete a template owned by the session user.
    ///
    /// Deleting a template that does not exist is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unauthorized`] without a session and
    /// [`ServiceError::Storage`] if the delete fails.
    pub async fn delete(
        &self,
        session: Option<&UserId>,
        id: TemplateId,
    ) -> Result<StatusAck, ServiceError> {
        let user = session.ok_or(ServiceError::Unauthorized)?;

        let removed = self
            .repository
            .delete(user, id)
            .await
            .map_err(|source| storage_error("delete", source))?;

        if removed {
            info!("Template {id} deleted");
        }
        Ok(StatusAck::ok())
    }
}

fn checked(payload: TemplatePayload) -> Result<TemplatePayload, ServiceError> {
    let payload = normalize_payload(payload);
    validate_payload(&payload).map_err(ServiceError::Validation)?;
    Ok(payload)
}

fn storage_error(operation: &'static str, source: Error) -> ServiceError {
    warn!("Failed to {operation} template: {source}");
    ServiceError::Storage { operation, source }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn service() -> TemplateService {
        TemplateService::new(TemplateRepository::in_memory().await.unwrap())
    }

    fn payload(title: &str) -> TemplatePayload {
        TemplatePayload {
            title: title.to_string(),
            content: "{}".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_requires_session() {
        let service = service().await;

        let err = service.create(None, payload("Welcome")).await.unwrap_err();
        assert_eq!(err.status(), 401);
        assert_eq!(err.to_body().message, "Unauthorized");

        let err = service.delete(None, TemplateId::new(1)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
    }

    #[tokio::test]
    async fn test_create_trims_and_validates() {
        let service = service().await;
        let user = UserId::new("u1");

        let err = service
            .create(Some(&user), payload("  ab  "))
            .await
            .unwrap_err();
        assert_eq!(err.status(), 400);
        assert_eq!(
            err.to_body().errors,
            vec!["Subject must be at least 3 characters".to_string()]
        );

        let created = service
            .create(Some(&user), payload("  Welcome  "))
            .await
            .unwrap();
        assert_eq!(created.template.title, "Welcome");
        assert_eq!(created.template.title_ja.as_deref(), Some("Welcome"));
    }

    #[tokio::test]
    async fn test_update_unknown_template_is_not_found() {
        let service = service().await;
        let user = UserId::new("u1");

        let err = service
            .update(Some(&user), TemplateId::new(42), payload("Welcome"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(err.to_body().message, "Template not found");
    }

    #[tokio::test]
    async fn test_empty_content_keeps_stored_content() {
        let service = service().await;
        let user = UserId::new("u1");
        let created = service.create(Some(&user), payload("Welcome")).await.unwrap();
        let id = created.template.id;

        let update = TemplatePayload {
            title: "Welcome again".to_string(),
            content: String::new(),
            content_ja: Some("{\"ja\":true}".to_string()),
            ..Default::default()
        };
        let ack = service.update(Some(&user), id, update).await.unwrap();
        assert_eq!(ack, StatusAck::ok());

        let stored = service.repository().get(&user, id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Welcome again");
        assert_eq!(stored.content, "{}");
        assert_eq!(stored.content_ja.as_deref(), Some("{\"ja\":true}"));

        let mut blank = payload("Blank body");
        blank.content = String::new();
        let created = service.create(Some(&user), blank).await.unwrap();
        assert_eq!(created.template.content, "");
    }

    #[tokio::test]
    async fn test_update_and_delete_round() {
        let service = service().await;
        let user = UserId::new("u1");
        let created = service.create(Some(&user), payload("Welcome")).await.unwrap();
        let id = created.template.id;

        let mut update = payload("Welcome again");
        update.content_ja = Some("{\"ja\":true}".to_string());
        let ack = service.update(Some(&user), id, update).await.unwrap();
        assert_eq!(ack, StatusAck::ok());

        let stored = service.repository().get(&user, id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Welcome again");
        assert_eq!(stored.content_ja.as_deref(), Some("{\"ja\":true}"));

        service.delete(Some(&user), id).await.unwrap();
        assert!(service.repository().get(&user, id).await.unwrap().is_none());
    }
}
