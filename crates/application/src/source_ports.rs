use async_trait::async_trait;
use launchpad_core::AppResult;
use serde_json::Value;

/// Port for reading template documents from a source-hosting service.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Downloads and parses the JSON document at `url`.
    ///
    /// Returns `Ok(None)` when the host answers with a non-success status.
    async fn fetch_template(&self, url: &str) -> AppResult<Option<Value>>;
}
