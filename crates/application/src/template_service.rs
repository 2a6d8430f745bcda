//! Template resolution and the template discovery aggregate.

use std::sync::Arc;

use launchpad_core::{AppError, AppResult, CallerCredential};
use launchpad_domain::{
    RepositoryHost, Subscription, TemplateDescriptor, Tenant, enabled_subscriptions,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::control_plane_ports::ControlPlaneClient;
use crate::settings::OrchestrationSettings;
use crate::site_name_allocator::SiteNameAllocator;
use crate::source_ports::TemplateSource;
use crate::tenant_service::{TenantService, TenantSource};

const WEB_PROVIDER_NAMESPACE: &str = "Microsoft.Web";
const SITE_RESOURCE_TYPE: &str = "sites";

/// Everything the console needs to render the deploy form for a repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDiscovery {
    /// Regions offering web sites in the first enabled subscription.
    pub site_locations: Vec<String>,
    /// Enabled subscriptions of the caller.
    pub subscriptions: Vec<Subscription>,
    /// Caller tenants, `None` when the listing failed.
    pub tenants: Option<Vec<Tenant>>,
    /// Display name of the caller.
    pub user_display_name: Option<String>,
    /// Suggested free site name.
    pub site_name: Option<String>,
    /// Template document.
    pub template: Value,
    /// Raw template URL.
    pub template_url: String,
    /// Canonical repository URL.
    pub repository_url: String,
    /// Branch the template was read from.
    pub branch: String,
    /// Informational failure raised while suggesting a site name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Application service for repository templates.
#[derive(Clone)]
pub struct TemplateService {
    template_source: Arc<dyn TemplateSource>,
    control_plane: Arc<dyn ControlPlaneClient>,
    tenant_service: TenantService,
    site_name_allocator: SiteNameAllocator,
    raw_base_url: String,
}

impl TemplateService {
    /// Creates a template service.
    #[must_use]
    pub fn new(
        template_source: Arc<dyn TemplateSource>,
        control_plane: Arc<dyn ControlPlaneClient>,
        tenant_service: TenantService,
        site_name_allocator: SiteNameAllocator,
        settings: &OrchestrationSettings,
    ) -> Self {
        Self {
            template_source,
            control_plane,
            tenant_service,
            site_name_allocator,
            raw_base_url: settings.source_raw_base_url.clone(),
        }
    }

    /// Resolves the repository URL and downloads its template document.
    pub async fn resolve_template(&self, repository_url: &str) -> AppResult<TemplateDescriptor> {
        let host = RepositoryHost::from_url(repository_url)?;
        let template_url = host.locator().template_url(self.raw_base_url.as_str());

        let template = self
            .template_source
            .fetch_template(template_url.as_str())
            .await?;
        debug!(
            template_url = %template_url,
            found = template.is_some(),
            "resolved repository template"
        );

        Ok(TemplateDescriptor::new(&host, template_url, template))
    }

    /// Builds the discovery aggregate for `repository_url`.
    pub async fn discover(
        &self,
        credential: &CallerCredential,
        repository_url: &str,
        tenant_source: &TenantSource,
    ) -> AppResult<TemplateDiscovery> {
        let descriptor = self.resolve_template(repository_url).await?;
        let Some(template) = descriptor.template_document else {
            return Err(AppError::NotFound(format!(
                "Could not find the Azure RM Template '{}'",
                descriptor.repository_url
            )));
        };

        let token = credential.token();
        let subscriptions =
            enabled_subscriptions(self.control_plane.list_subscriptions(token).await?);

        let tenants = match self.tenant_service.list_tenants(credential, tenant_source).await {
            Ok(tenants) => Some(tenants),
            Err(error) => {
                warn!(error = %error, "tenant listing failed during template discovery");
                None
            }
        };

        let mut site_locations = Vec::new();
        let mut site_name = None;
        let mut error = None;
        if let Some(subscription) = subscriptions.first() {
            site_locations = self
                .control_plane
                .get_provider(token, subscription.subscription_id.as_str(), WEB_PROVIDER_NAMESPACE)
                .await?
                .public_locations(SITE_RESOURCE_TYPE);

            match self
                .site_name_allocator
                .allocate(
                    token,
                    subscription.subscription_id.as_str(),
                    descriptor.repository_name.as_str(),
                )
                .await
            {
                Ok(name) => site_name = name,
                Err(allocation_error) => error = Some(allocation_error.to_string()),
            }
        }

        info!(
            repository_url = %descriptor.repository_url,
            subscription_count = subscriptions.len(),
            site_name_suggested = site_name.is_some(),
            "template discovery completed"
        );

        Ok(TemplateDiscovery {
            site_locations,
            subscriptions,
            tenants,
            user_display_name: credential.display_name().map(str::to_owned),
            site_name,
            template,
            template_url: descriptor.template_url,
            repository_url: descriptor.repository_url,
            branch: descriptor.branch,
            error,
        })
    }
}
