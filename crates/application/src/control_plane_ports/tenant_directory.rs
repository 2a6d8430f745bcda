use async_trait::async_trait;
use launchpad_core::{AccessToken, AppResult};
use launchpad_domain::Tenant;

/// Port for the hosted tenant-details endpoint served next to the console.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    /// Lists tenant details from the configured endpoint.
    ///
    /// Non-success responses surface as `AppError::Upstream`.
    async fn list_tenant_details(&self, token: &AccessToken) -> AppResult<Vec<Tenant>>;
}
