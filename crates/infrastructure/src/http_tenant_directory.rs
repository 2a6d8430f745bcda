use async_trait::async_trait;
use launchpad_application::TenantDirectory;
use launchpad_core::{AccessToken, AppError, AppResult};
use launchpad_domain::Tenant;
use url::Url;

const TENANT_DETAILS_SEGMENT: &str = "tenantdetails";

/// Reads tenant details from the endpoint hosted next to the console.
///
/// The endpoint is fixed at construction; inbound request headers never
/// select where the caller's token is sent.
pub struct HttpTenantDirectory {
    http_client: reqwest::Client,
    endpoint: Url,
}

impl HttpTenantDirectory {
    /// Creates a tenant directory adapter reading `{base_url}/tenantdetails`.
    pub fn new(http_client: reqwest::Client, base_url: &str) -> AppResult<Self> {
        let mut endpoint = Url::parse(base_url).map_err(|error| {
            AppError::Validation(format!("invalid tenant details url '{base_url}': {error}"))
        })?;
        endpoint
            .path_segments_mut()
            .map_err(|()| {
                AppError::Validation(format!(
                    "tenant details url '{base_url}' cannot be used as a base"
                ))
            })?
            .pop_if_empty()
            .push(TENANT_DETAILS_SEGMENT);

        Ok(Self {
            http_client,
            endpoint,
        })
    }
}

#[async_trait]
impl TenantDirectory for HttpTenantDirectory {
    async fn list_tenant_details(&self, token: &AccessToken) -> AppResult<Vec<Tenant>> {
        let response = self
            .http_client
            .get(self.endpoint.clone())
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!("tenant details transport error: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status_code: status.as_u16(),
                body,
            });
        }

        response.json::<Vec<Tenant>>().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to decode tenant details from '{}': {error}",
                self.endpoint
            ))
        })
    }
}
