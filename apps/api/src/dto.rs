use launchpad_application::{DeploymentStatus, TemplateDiscovery};
use launchpad_domain::{Subscription, SubscriptionState, Tenant};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Query for token diagnostics.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenQuery {
    #[serde(default)]
    pub plain_text: bool,
}

/// Query selecting a subscription and template.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDeploymentQuery {
    pub subscription_id: String,
    pub template_url: String,
}

/// Query selecting a site inside a subscription.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteQuery {
    pub subscription_id: String,
    pub site_name: String,
}

/// Query for template discovery.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryQuery {
    pub repository_url: String,
}

/// API representation of a directory tenant.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/tenant-response.ts"
)]
pub struct TenantResponse {
    pub display_name: String,
    pub domain_name: String,
    pub tenant_id: String,
    #[serde(rename = "Current")]
    pub current: bool,
}

impl From<Tenant> for TenantResponse {
    fn from(value: Tenant) -> Self {
        Self {
            display_name: value.display_name,
            domain_name: value.domain_name,
            tenant_id: value.tenant_id,
            current: value.is_current,
        }
    }
}

/// API representation of a subscription.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/subscription-response.ts"
)]
pub struct SubscriptionResponse {
    pub subscription_id: String,
    pub display_name: Option<String>,
    pub state: String,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(value: Subscription) -> Self {
        let state = match value.state {
            SubscriptionState::Enabled => "Enabled".to_owned(),
            SubscriptionState::Warned => "Warned".to_owned(),
            SubscriptionState::PastDue => "PastDue".to_owned(),
            SubscriptionState::Disabled => "Disabled".to_owned(),
            SubscriptionState::Deleted => "Deleted".to_owned(),
            SubscriptionState::Other(state) => state,
        };

        Self {
            subscription_id: value.subscription_id,
            display_name: value.display_name,
            state,
        }
    }
}

/// Providers referenced by a validated template.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/preview-response.ts"
)]
pub struct PreviewResponse {
    pub providers: Vec<String>,
}

/// Empty body returned once a deployment was submitted.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/deploy-response.ts"
)]
pub struct DeployResponse {}

/// Provisioning state and operations of a deployment.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/deployment-status-response.ts"
)]
pub struct DeploymentStatusResponse {
    pub provisioning_state: String,
    #[ts(type = "unknown")]
    pub operations: Value,
    pub site_url: Option<String>,
}

impl From<DeploymentStatus> for DeploymentStatusResponse {
    fn from(value: DeploymentStatus) -> Self {
        Self {
            provisioning_state: value.provisioning_state.as_str().to_owned(),
            operations: value.operations,
            site_url: value.site_url,
        }
    }
}

/// Hostname availability for a site name.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/site-availability-response.ts"
)]
pub struct SiteAvailabilityResponse {
    pub site_name: String,
    pub is_available: bool,
}

/// Template discovery aggregate.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/template-discovery-response.ts"
)]
pub struct TemplateDiscoveryResponse {
    pub site_locations: Vec<String>,
    pub subscriptions: Vec<SubscriptionResponse>,
    pub tenants: Option<Vec<TenantResponse>>,
    pub user_display_name: Option<String>,
    pub site_name: Option<String>,
    #[ts(type = "unknown")]
    pub template: Value,
    pub template_url: String,
    pub repository_url: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

impl From<TemplateDiscovery> for TemplateDiscoveryResponse {
    fn from(value: TemplateDiscovery) -> Self {
        Self {
            site_locations: value.site_locations,
            subscriptions: value
                .subscriptions
                .into_iter()
                .map(SubscriptionResponse::from)
                .collect(),
            tenants: value
                .tenants
                .map(|tenants| tenants.into_iter().map(TenantResponse::from).collect()),
            user_display_name: value.user_display_name,
            site_name: value.site_name,
            template: value.template,
            template_url: value.template_url,
            repository_url: value.repository_url,
            branch: value.branch,
            error: value.error,
        }
    }
}
