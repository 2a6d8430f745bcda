use async_trait::async_trait;
use launchpad_application::TemplateSource;
use launchpad_core::{AppError, AppResult};
use serde_json::Value;
use tracing::debug;

/// Downloads template documents over plain HTTP(S).
pub struct HttpTemplateSource {
    http_client: reqwest::Client,
}

impl HttpTemplateSource {
    /// Creates a template source adapter.
    #[must_use]
    pub fn new(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    async fn fetch_template(&self, url: &str) -> AppResult<Option<Value>> {
        let response = self.http_client.get(url).send().await.map_err(|error| {
            AppError::Internal(format!("template download transport error: {error}"))
        })?;

        if !response.status().is_success() {
            debug!(url, status = %response.status(), "template not available");
            return Ok(None);
        }

        let body = response.text().await.map_err(|error| {
            AppError::Internal(format!("failed to read template '{url}': {error}"))
        })?;
        serde_json::from_str(body.as_str())
            .map(Some)
            .map_err(|error| AppError::Internal(format!("template '{url}' is not JSON: {error}")))
    }
}
