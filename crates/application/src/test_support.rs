use std::collections::VecDeque;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use launchpad_core::{AccessToken, AppError, AppResult, CallerCredential};
use launchpad_domain::{
    DeploymentRequest, ProvisioningState, ResourceGroup, Subscription, Tenant,
};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::CleanupScheduler;
use crate::TemplateSource;
use crate::control_plane_ports::{
    ControlPlaneClient, DeploymentValidation, ProviderMetadata, ProxiedResponse,
    ResourceGroupWrite, TenantDirectory,
};

pub(crate) fn access_token(claims: Value) -> AccessToken {
    let token = format!(
        "eyJ0eXAiOiJKV1QifQ.{}.signature",
        URL_SAFE_NO_PAD.encode(claims.to_string())
    );
    AccessToken::new(token).unwrap_or_else(|_| unreachable!())
}

pub(crate) fn caller(tenant_id: &str) -> CallerCredential {
    CallerCredential::new(
        access_token(json!({"tid": tenant_id, "upn": "dev@contoso.com"})),
        Some("dev@contoso.com".to_owned()),
        Some("Dev".to_owned()),
    )
}

fn cloud_error(code: &str) -> AppError {
    AppError::CloudOperation {
        status_code: 400,
        code: code.to_owned(),
        message: format!("{code} raised by fake control plane"),
    }
}

pub(crate) struct FakeState {
    pub tenant_ids: Vec<String>,
    pub subscriptions: Vec<Subscription>,
    pub provider: Option<ProviderMetadata>,
    /// `None` makes resource group creation fail.
    pub resource_group_status: Option<u16>,
    pub validation: DeploymentValidation,
    pub deployment_error_code: Option<String>,
    pub deployment_state: ProvisioningState,
    pub operations: Value,
    pub host_names: Vec<String>,
    /// `Err(status)` answers with an upstream failure.
    pub site_deployment_responses: VecDeque<Result<Vec<Value>, u16>>,
    pub hostname_availability: VecDeque<bool>,
    pub calls: Vec<String>,
    pub resource_groups: Vec<ResourceGroup>,
    pub deployments: Vec<(String, String, Value)>,
    pub probed_site_names: Vec<String>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            tenant_ids: Vec::new(),
            subscriptions: Vec::new(),
            provider: None,
            resource_group_status: Some(201),
            validation: DeploymentValidation::Valid {
                provider_namespaces: Vec::new(),
            },
            deployment_error_code: None,
            deployment_state: ProvisioningState::Running,
            operations: json!({"value": []}),
            host_names: Vec::new(),
            site_deployment_responses: VecDeque::new(),
            hostname_availability: VecDeque::new(),
            calls: Vec::new(),
            resource_groups: Vec::new(),
            deployments: Vec::new(),
            probed_site_names: Vec::new(),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeControlPlane {
    pub state: Mutex<FakeState>,
}

impl FakeControlPlane {
    pub(crate) fn new(state: FakeState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub(crate) async fn call_count(&self, name: &str) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| call.as_str() == name)
            .count()
    }

    async fn record(&self, name: &str) -> tokio::sync::MutexGuard<'_, FakeState> {
        let mut state = self.state.lock().await;
        state.calls.push(name.to_owned());
        state
    }
}

#[async_trait]
impl ControlPlaneClient for FakeControlPlane {
    async fn list_tenant_ids(&self, _token: &AccessToken) -> AppResult<Vec<String>> {
        Ok(self.record("list_tenant_ids").await.tenant_ids.clone())
    }

    async fn list_subscriptions(&self, _token: &AccessToken) -> AppResult<Vec<Subscription>> {
        Ok(self.record("list_subscriptions").await.subscriptions.clone())
    }

    async fn get_provider(
        &self,
        _token: &AccessToken,
        _subscription_id: &str,
        namespace: &str,
    ) -> AppResult<ProviderMetadata> {
        self.record("get_provider")
            .await
            .provider
            .clone()
            .ok_or_else(|| AppError::NotFound(format!("provider '{namespace}'")))
    }

    async fn create_or_update_resource_group(
        &self,
        _token: &AccessToken,
        _subscription_id: &str,
        resource_group: &ResourceGroup,
    ) -> AppResult<ResourceGroupWrite> {
        let mut state = self.record("create_or_update_resource_group").await;
        let status_code = state
            .resource_group_status
            .ok_or_else(|| cloud_error("ResourceGroupCreateFailed"))?;
        state.resource_groups.push(resource_group.clone());
        Ok(ResourceGroupWrite { status_code })
    }

    async fn delete_resource_group(
        &self,
        _token: &AccessToken,
        _subscription_id: &str,
        _resource_group_name: &str,
    ) -> AppResult<()> {
        self.record("delete_resource_group").await;
        Ok(())
    }

    async fn validate_deployment(
        &self,
        _token: &AccessToken,
        _subscription_id: &str,
        resource_group_name: &str,
        deployment_name: &str,
        request: &DeploymentRequest,
    ) -> AppResult<DeploymentValidation> {
        let mut state = self.record("validate_deployment").await;
        state.deployments.push((
            resource_group_name.to_owned(),
            deployment_name.to_owned(),
            request.parameters().clone(),
        ));
        Ok(state.validation.clone())
    }

    async fn create_or_update_deployment(
        &self,
        _token: &AccessToken,
        _subscription_id: &str,
        resource_group_name: &str,
        deployment_name: &str,
        request: &DeploymentRequest,
    ) -> AppResult<Option<ProvisioningState>> {
        let mut state = self.record("create_or_update_deployment").await;
        if let Some(code) = state.deployment_error_code.clone() {
            return Err(cloud_error(code.as_str()));
        }

        state.deployments.push((
            resource_group_name.to_owned(),
            deployment_name.to_owned(),
            request.parameters().clone(),
        ));
        Ok(Some(ProvisioningState::Accepted))
    }

    async fn get_deployment_state(
        &self,
        _token: &AccessToken,
        _subscription_id: &str,
        _resource_group_name: &str,
        _deployment_name: &str,
    ) -> AppResult<ProvisioningState> {
        Ok(self.record("get_deployment_state").await.deployment_state.clone())
    }

    async fn get_deployment_operations(
        &self,
        _token: &AccessToken,
        _subscription_id: &str,
        _site_name: &str,
    ) -> AppResult<Value> {
        Ok(self.record("get_deployment_operations").await.operations.clone())
    }

    async fn list_site_deployments(
        &self,
        _token: &AccessToken,
        _subscription_id: &str,
        _site_name: &str,
    ) -> AppResult<Vec<Value>> {
        let mut state = self.record("list_site_deployments").await;
        match state.site_deployment_responses.pop_front() {
            Some(Ok(entries)) => Ok(entries),
            Some(Err(status_code)) => Err(AppError::Upstream {
                status_code,
                body: r#"{"error":"upstream"}"#.to_owned(),
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn is_hostname_available(
        &self,
        _token: &AccessToken,
        _subscription_id: &str,
        site_name: &str,
    ) -> AppResult<bool> {
        let mut state = self.record("is_hostname_available").await;
        state.probed_site_names.push(site_name.to_owned());
        Ok(state.hostname_availability.pop_front().unwrap_or(false))
    }

    async fn get_site_host_names(
        &self,
        _token: &AccessToken,
        _subscription_id: &str,
        _site_name: &str,
    ) -> AppResult<Vec<String>> {
        Ok(self.record("get_site_host_names").await.host_names.clone())
    }

    async fn proxy_get(&self, _token: &AccessToken, path: &str) -> AppResult<ProxiedResponse> {
        self.record("proxy_get").await;
        Ok(ProxiedResponse {
            status_code: 200,
            content_type: Some("application/json".to_owned()),
            body: format!(r#"{{"path":"{path}"}}"#).into_bytes(),
        })
    }
}

#[derive(Default)]
pub(crate) struct FakeTenantDirectory {
    pub tenants: Vec<Tenant>,
    pub failure_status: Option<u16>,
}

#[async_trait]
impl TenantDirectory for FakeTenantDirectory {
    async fn list_tenant_details(&self, _token: &AccessToken) -> AppResult<Vec<Tenant>> {
        match self.failure_status {
            Some(status_code) => Err(AppError::Upstream {
                status_code,
                body: String::new(),
            }),
            None => Ok(self.tenants.clone()),
        }
    }
}

#[derive(Default)]
pub(crate) struct RecordingCleanupScheduler {
    pub scheduled: StdMutex<Vec<(String, String)>>,
}

impl RecordingCleanupScheduler {
    pub(crate) fn scheduled(&self) -> Vec<(String, String)> {
        self.scheduled
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl CleanupScheduler for RecordingCleanupScheduler {
    fn schedule_resource_group_deletion(
        &self,
        _token: AccessToken,
        subscription_id: String,
        resource_group_name: String,
    ) {
        self.scheduled
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((subscription_id, resource_group_name));
    }
}

#[derive(Default)]
pub(crate) struct FakeTemplateSource {
    pub template: Option<Value>,
    pub requested_urls: Mutex<Vec<String>>,
}

#[async_trait]
impl TemplateSource for FakeTemplateSource {
    async fn fetch_template(&self, url: &str) -> AppResult<Option<Value>> {
        self.requested_urls.lock().await.push(url.to_owned());
        Ok(self.template.clone())
    }
}
