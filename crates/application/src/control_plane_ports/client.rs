use async_trait::async_trait;
use launchpad_core::{AccessToken, AppResult};
use launchpad_domain::{DeploymentRequest, ProvisioningState, ResourceGroup, Subscription};
use serde_json::Value;

use super::resources::{DeploymentValidation, ProviderMetadata, ProxiedResponse, ResourceGroupWrite};

/// Port for the cloud control-plane REST API.
///
/// Every call runs with the caller's token. Non-success responses surface as
/// `AppError::CloudOperation` unless a method documents otherwise.
#[async_trait]
pub trait ControlPlaneClient: Send + Sync {
    /// Lists tenant identifiers visible to the caller.
    ///
    /// Non-success responses surface as `AppError::Upstream` so they can be relayed.
    async fn list_tenant_ids(&self, token: &AccessToken) -> AppResult<Vec<String>>;

    /// Lists subscriptions visible to the caller.
    async fn list_subscriptions(&self, token: &AccessToken) -> AppResult<Vec<Subscription>>;

    /// Reads provider registration metadata for one namespace.
    async fn get_provider(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        namespace: &str,
    ) -> AppResult<ProviderMetadata>;

    /// Creates the resource group or updates it when it already exists.
    async fn create_or_update_resource_group(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        resource_group: &ResourceGroup,
    ) -> AppResult<ResourceGroupWrite>;

    /// Deletes a resource group.
    async fn delete_resource_group(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        resource_group_name: &str,
    ) -> AppResult<()>;

    /// Submits a validate-only deployment.
    async fn validate_deployment(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        resource_group_name: &str,
        deployment_name: &str,
        request: &DeploymentRequest,
    ) -> AppResult<DeploymentValidation>;

    /// Submits a deployment that provisions resources.
    async fn create_or_update_deployment(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        resource_group_name: &str,
        deployment_name: &str,
        request: &DeploymentRequest,
    ) -> AppResult<Option<ProvisioningState>>;

    /// Reads the provisioning state of a deployment.
    async fn get_deployment_state(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        resource_group_name: &str,
        deployment_name: &str,
    ) -> AppResult<ProvisioningState>;

    /// Reads the operations log of the deployment named after `site_name`.
    async fn get_deployment_operations(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        site_name: &str,
    ) -> AppResult<Value>;

    /// Reads the source-control deployment log of a site.
    ///
    /// Non-success responses surface as `AppError::Upstream`.
    async fn list_site_deployments(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        site_name: &str,
    ) -> AppResult<Vec<Value>>;

    /// Checks whether a site hostname is still free.
    async fn is_hostname_available(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        site_name: &str,
    ) -> AppResult<bool>;

    /// Returns the host names bound to a site.
    async fn get_site_host_names(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        site_name: &str,
    ) -> AppResult<Vec<String>>;

    /// Relays a GET for an arbitrary control-plane path.
    async fn proxy_get(&self, token: &AccessToken, path: &str) -> AppResult<ProxiedResponse>;
}
