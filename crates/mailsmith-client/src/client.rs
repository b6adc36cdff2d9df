//! HTTP implementation of [`TemplateApi`].

use std::time::Duration;

use mailsmith_core::{
    ApiErrorBody, PersistedTemplate, TemplateEnvelope, TemplateId, TemplatePayload,
};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::api::TemplateApi;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{PreviewRequest, PreviewResponse, SendEmailRequest};

/// Template API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http_client: Client,
    session_token: Option<String>,
}

impl ApiClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// A trailing `/` is added when missing so endpoint paths join beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            http_client: Client::new(),
            session_token: None,
        })
    }

    /// Creates a client from configuration, applying its timeout and token.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        if config.timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: normalize_base_url(&config.base_url)?,
            http_client,
            session_token: config.session_token.clone(),
        })
    }

    /// Sets the session token sent as a bearer token.
    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// The API root.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);

        let mut request = self.http_client.post(url).json(body);
        if let Some(token) = &self.session_token {
            request = request.bearer_auth(token);
        }

        check(request.send().await?).await
    }

    async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.endpoint(path)?;
        debug!("DELETE {}", url);

        let mut request = self.http_client.delete(url);
        if let Some(token) = &self.session_token {
            request = request.bearer_auth(token);
        }

        check(request.send().await?).await
    }
}

impl TemplateApi for ApiClient {
    async fn create_template(&self, payload: &TemplatePayload) -> Result<PersistedTemplate> {
        let response = self.post_json("templates", payload).await?;
        let envelope: TemplateEnvelope = response.json().await?;
        Ok(envelope.template)
    }

    async fn update_template(&self, id: TemplateId, payload: &TemplatePayload) -> Result<()> {
        self.post_json(&format!("templates/{id}"), payload).await?;
        Ok(())
    }

    async fn delete_template(&self, id: TemplateId) -> Result<()> {
        self.delete(&format!("templates/{id}")).await?;
        Ok(())
    }

    async fn render_preview(&self, request: &PreviewRequest) -> Result<String> {
        let response = self.post_json("emails/preview", request).await?;
        let preview: PreviewResponse = response.json().await?;
        Ok(preview.html)
    }

    async fn send_email(&self, request: &SendEmailRequest) -> Result<()> {
        self.post_json("emails/send", request).await?;
        Ok(())
    }
}

fn normalize_base_url(base_url: &str) -> Result<Url> {
    if base_url.ends_with('/') {
        Ok(Url::parse(base_url)?)
    } else {
        Ok(Url::parse(&format!("{base_url}/"))?)
    }
}

/// Maps non-success responses to errors, reading the server's error body
/// when it has one.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<ApiErrorBody>(&text).ok();
    warn!("Request failed with status {}", status);

    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Unauthorized {
            message: body.map_or_else(|| "Unauthorized".to_string(), |b| b.message),
        });
    }

    let (message, errors) = body.map_or_else(
        || (String::new(), Vec::new()),
        |b| (b.message, b.errors),
    );
    Err(Error::Api {
        status: status.as_u16(),
        message,
        errors,
    })
}
