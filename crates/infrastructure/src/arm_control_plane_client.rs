use async_trait::async_trait;
use launchpad_application::{
    ControlPlaneClient, DeploymentValidation, ProviderMetadata, ProxiedResponse,
    ResourceGroupWrite,
};
use launchpad_core::{AccessToken, AppError, AppResult};
use launchpad_domain::{DeploymentRequest, ProvisioningState, ResourceGroup, Subscription};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

const API_VERSION_PARAMETER: &str = "api-version";

#[derive(Debug, Deserialize)]
struct ValueEnvelope<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TenantIdEntry {
    tenant_id: String,
}

#[derive(Debug, Deserialize)]
struct CloudErrorEnvelope {
    error: CloudErrorBody,
}

#[derive(Debug, Deserialize)]
struct CloudErrorBody {
    code: String,
    #[serde(default)]
    message: String,
}

/// Resource-manager REST implementation of the control-plane port.
pub struct ArmControlPlaneClient {
    http_client: reqwest::Client,
    base_url: Url,
    api_version: String,
}

impl ArmControlPlaneClient {
    /// Creates a client rooted at `base_url` pinned to `api_version`.
    pub fn new(
        http_client: reqwest::Client,
        base_url: &str,
        api_version: impl Into<String>,
    ) -> AppResult<Self> {
        let base_url = Url::parse(base_url).map_err(|error| {
            AppError::Validation(format!("invalid control plane url '{base_url}': {error}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "control plane url '{base_url}' cannot be used as a base"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
            api_version: api_version.into(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::Internal("control plane url cannot be a base".to_owned()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .append_pair(API_VERSION_PARAMETER, self.api_version.as_str());
        Ok(url)
    }

    fn proxy_endpoint(&self, path: &str) -> AppResult<Url> {
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>();

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::Internal("control plane url cannot be a base".to_owned()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.set_query(Some(query));
        }

        let has_api_version = url
            .query_pairs()
            .any(|(name, _)| name.eq_ignore_ascii_case(API_VERSION_PARAMETER));
        if !has_api_version {
            url.query_pairs_mut()
                .append_pair(API_VERSION_PARAMETER, self.api_version.as_str());
        }

        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> AppResult<reqwest::Response> {
        request.send().await.map_err(|error| {
            AppError::Internal(format!("control plane transport error: {error}"))
        })
    }

    async fn get(&self, token: &AccessToken, url: Url) -> AppResult<reqwest::Response> {
        debug!(url = %url, "control plane GET");
        self.send(self.http_client.get(url).bearer_auth(token.as_str()))
            .await
    }

    async fn get_json<T>(&self, token: &AccessToken, url: Url) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.get(token, url).await?;
        if !response.status().is_success() {
            return Err(cloud_operation_error(response).await);
        }

        decode_json(response).await
    }

    async fn get_json_or_upstream<T>(&self, token: &AccessToken, url: Url) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.get(token, url).await?;
        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        decode_json(response).await
    }

    fn deployment_segments<'a>(
        subscription_id: &'a str,
        resource_group_name: &'a str,
        deployment_name: &'a str,
    ) -> [&'a str; 8] {
        [
            "subscriptions",
            subscription_id,
            "resourcegroups",
            resource_group_name,
            "providers",
            "Microsoft.Resources",
            "deployments",
            deployment_name,
        ]
    }
}

fn deployment_body(request: &DeploymentRequest) -> Value {
    json!({
        "properties": {
            "templateLink": { "uri": request.template_url().as_str() },
            "parameters": request.parameters(),
            "mode": "Incremental",
        }
    })
}

fn provisioning_state_of(document: &Value) -> Option<ProvisioningState> {
    document
        .pointer("/properties/provisioningState")
        .and_then(Value::as_str)
        .map(ProvisioningState::parse)
}

fn provider_namespaces_of(document: &Value) -> Vec<String> {
    document
        .pointer("/properties/providers")
        .and_then(Value::as_array)
        .map(|providers| {
            providers
                .iter()
                .filter_map(|provider| provider.get("namespace").and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn site_deployment_entries(document: Value) -> Vec<Value> {
    let Value::Object(mut document) = document else {
        return match document {
            Value::Array(entries) => entries,
            _ => Vec::new(),
        };
    };

    for key in ["properties", "value"] {
        if let Some(Value::Array(entries)) = document.remove(key) {
            return entries;
        }
    }

    Vec::new()
}

fn hostname_availability_of(document: &Value) -> bool {
    document
        .as_bool()
        .or_else(|| {
            document
                .pointer("/properties/isAvailable")
                .and_then(Value::as_bool)
        })
        .or_else(|| document.get("isAvailable").and_then(Value::as_bool))
        .unwrap_or(false)
}

async fn decode_json<T>(response: reqwest::Response) -> AppResult<T>
where
    T: DeserializeOwned,
{
    response.json::<T>().await.map_err(|error| {
        AppError::Internal(format!("failed to decode control plane response: {error}"))
    })
}

async fn read_body(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "<response body unavailable>".to_owned())
}

async fn cloud_operation_error(response: reqwest::Response) -> AppError {
    let status_code = response.status().as_u16();
    let body = read_body(response).await;

    match serde_json::from_str::<CloudErrorEnvelope>(body.as_str()) {
        Ok(envelope) => AppError::CloudOperation {
            status_code,
            code: envelope.error.code,
            message: envelope.error.message,
        },
        Err(_) => AppError::CloudOperation {
            status_code,
            code: format!("HttpStatus{status_code}"),
            message: body,
        },
    }
}

async fn upstream_error(response: reqwest::Response) -> AppError {
    let status_code = response.status().as_u16();
    AppError::Upstream {
        status_code,
        body: read_body(response).await,
    }
}

#[async_trait]
impl ControlPlaneClient for ArmControlPlaneClient {
    async fn list_tenant_ids(&self, token: &AccessToken) -> AppResult<Vec<String>> {
        let url = self.endpoint(&["tenants"])?;
        let envelope: ValueEnvelope<TenantIdEntry> =
            self.get_json_or_upstream(token, url).await?;
        Ok(envelope
            .value
            .into_iter()
            .map(|entry| entry.tenant_id)
            .collect())
    }

    async fn list_subscriptions(&self, token: &AccessToken) -> AppResult<Vec<Subscription>> {
        let url = self.endpoint(&["subscriptions"])?;
        let envelope: ValueEnvelope<Subscription> = self.get_json(token, url).await?;
        Ok(envelope.value)
    }

    async fn get_provider(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        namespace: &str,
    ) -> AppResult<ProviderMetadata> {
        let url = self.endpoint(&["subscriptions", subscription_id, "providers", namespace])?;
        self.get_json(token, url).await
    }

    async fn create_or_update_resource_group(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        resource_group: &ResourceGroup,
    ) -> AppResult<ResourceGroupWrite> {
        let url = self.endpoint(&[
            "subscriptions",
            subscription_id,
            "resourcegroups",
            resource_group.name(),
        ])?;
        let response = self
            .send(
                self.http_client
                    .put(url)
                    .bearer_auth(token.as_str())
                    .json(&json!({ "location": resource_group.location() })),
            )
            .await?;
        if !response.status().is_success() {
            return Err(cloud_operation_error(response).await);
        }

        debug!(
            resource_group = resource_group.name(),
            status = %response.status(),
            "resource group written"
        );
        Ok(ResourceGroupWrite {
            status_code: response.status().as_u16(),
        })
    }

    async fn delete_resource_group(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        resource_group_name: &str,
    ) -> AppResult<()> {
        let url = self.endpoint(&[
            "subscriptions",
            subscription_id,
            "resourcegroups",
            resource_group_name,
        ])?;
        let response = self
            .send(self.http_client.delete(url).bearer_auth(token.as_str()))
            .await?;
        if !response.status().is_success() {
            return Err(cloud_operation_error(response).await);
        }

        Ok(())
    }

    async fn validate_deployment(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        resource_group_name: &str,
        deployment_name: &str,
        request: &DeploymentRequest,
    ) -> AppResult<DeploymentValidation> {
        let url = self.endpoint(&[
            "subscriptions",
            subscription_id,
            "resourcegroups",
            resource_group_name,
            "providers",
            "Microsoft.Resources",
            "deployments",
            deployment_name,
            "validate",
        ])?;
        let response = self
            .send(
                self.http_client
                    .post(url)
                    .bearer_auth(token.as_str())
                    .json(&deployment_body(request)),
            )
            .await?;

        let status_code = response.status().as_u16();
        if status_code != 200 {
            let body = read_body(response).await;
            debug!(
                resource_group = resource_group_name,
                status_code,
                body = %body,
                "deployment validation rejected"
            );
            return Ok(DeploymentValidation::Rejected { status_code });
        }

        let document: Value = decode_json(response).await?;
        Ok(DeploymentValidation::Valid {
            provider_namespaces: provider_namespaces_of(&document),
        })
    }

    async fn create_or_update_deployment(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        resource_group_name: &str,
        deployment_name: &str,
        request: &DeploymentRequest,
    ) -> AppResult<Option<ProvisioningState>> {
        let url = self.endpoint(&Self::deployment_segments(
            subscription_id,
            resource_group_name,
            deployment_name,
        ))?;
        let response = self
            .send(
                self.http_client
                    .put(url)
                    .bearer_auth(token.as_str())
                    .json(&deployment_body(request)),
            )
            .await?;
        if !response.status().is_success() {
            return Err(cloud_operation_error(response).await);
        }

        match response.json::<Value>().await {
            Ok(document) => Ok(provisioning_state_of(&document)),
            Err(error) => {
                warn!(
                    deployment_name,
                    %error,
                    "deployment accepted but response body was not JSON"
                );
                Ok(None)
            }
        }
    }

    async fn get_deployment_state(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        resource_group_name: &str,
        deployment_name: &str,
    ) -> AppResult<ProvisioningState> {
        let url = self.endpoint(&Self::deployment_segments(
            subscription_id,
            resource_group_name,
            deployment_name,
        ))?;
        let document: Value = self.get_json(token, url).await?;
        provisioning_state_of(&document).ok_or_else(|| {
            AppError::Internal(format!(
                "deployment '{deployment_name}' has no provisioning state"
            ))
        })
    }

    async fn get_deployment_operations(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        site_name: &str,
    ) -> AppResult<Value> {
        let url = self.endpoint(&[
            "subscriptions",
            subscription_id,
            "resourcegroups",
            site_name,
            "deployments",
            site_name,
            "operations",
        ])?;
        self.get_json(token, url).await
    }

    async fn list_site_deployments(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        site_name: &str,
    ) -> AppResult<Vec<Value>> {
        let url = self.endpoint(&[
            "subscriptions",
            subscription_id,
            "resourceGroups",
            site_name,
            "providers",
            "Microsoft.Web",
            "sites",
            site_name,
            "deployments",
        ])?;
        let document: Value = self.get_json_or_upstream(token, url).await?;
        Ok(site_deployment_entries(document))
    }

    async fn is_hostname_available(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        site_name: &str,
    ) -> AppResult<bool> {
        let url = self.endpoint(&[
            "subscriptions",
            subscription_id,
            "providers",
            "Microsoft.Web",
            "ishostnameavailable",
            site_name,
        ])?;
        let document: Value = self.get_json(token, url).await?;
        Ok(hostname_availability_of(&document))
    }

    async fn get_site_host_names(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        site_name: &str,
    ) -> AppResult<Vec<String>> {
        let url = self.endpoint(&[
            "subscriptions",
            subscription_id,
            "resourceGroups",
            site_name,
            "providers",
            "Microsoft.Web",
            "sites",
            site_name,
        ])?;
        let document: Value = self.get_json(token, url).await?;
        Ok(document
            .pointer("/properties/hostNames")
            .and_then(Value::as_array)
            .map(|host_names| {
                host_names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn proxy_get(&self, token: &AccessToken, path: &str) -> AppResult<ProxiedResponse> {
        let url = self.proxy_endpoint(path)?;
        let response = self.get(token, url).await?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await.map_err(|error| {
            AppError::Internal(format!("failed to read control plane response: {error}"))
        })?;

        Ok(ProxiedResponse {
            status_code,
            content_type,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests;
