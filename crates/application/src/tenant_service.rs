//! Tenant discovery and switching.

use std::sync::Arc;

use launchpad_core::{AppResult, CallerCredential, TenantId};
use launchpad_domain::{Tenant, decode_token_claims, mark_current_tenants};
use tracing::debug;

use crate::control_plane_ports::{ControlPlaneClient, TenantDirectory};

/// Name of the cookie that pins later requests to a tenant.
pub const TENANT_COOKIE_NAME: &str = "OAuthTenant";

const TENANT_ROUTE_SEGMENT: &str = "/api/tenants";

/// Where tenant data is read from for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantSource {
    /// Console is hosted: read the configured tenant-details endpoint.
    Hosted,
    /// Local development: read the control-plane tenant listing.
    Loopback,
}

/// Redirect and cookie that switch the active tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantSwitch {
    /// Redirect target with the tenant route stripped.
    pub location: String,
    /// Full `Set-Cookie` header value.
    pub cookie: String,
}

/// Application service resolving the caller's tenants.
#[derive(Clone)]
pub struct TenantService {
    control_plane: Arc<dyn ControlPlaneClient>,
    directory: Arc<dyn TenantDirectory>,
}

impl TenantService {
    /// Creates a tenant service.
    #[must_use]
    pub fn new(
        control_plane: Arc<dyn ControlPlaneClient>,
        directory: Arc<dyn TenantDirectory>,
    ) -> Self {
        Self {
            control_plane,
            directory,
        }
    }

    /// Lists tenants and marks the one matching the caller's `tid` claim.
    pub async fn list_tenants(
        &self,
        credential: &CallerCredential,
        source: &TenantSource,
    ) -> AppResult<Vec<Tenant>> {
        let claims = decode_token_claims(credential.token().as_str())?;

        let tenants = match source {
            TenantSource::Hosted => self.directory.list_tenant_details(credential.token()).await?,
            TenantSource::Loopback => self
                .control_plane
                .list_tenant_ids(credential.token())
                .await?
                .into_iter()
                .map(Tenant::from_tenant_id)
                .collect(),
        };

        debug!(tenant_count = tenants.len(), "resolved caller tenants");
        Ok(mark_current_tenants(tenants, &claims))
    }

    /// Builds the redirect that pins subsequent requests to `tenant_id`.
    pub fn switch_tenant(&self, request_url: &str, tenant_id: &str) -> AppResult<TenantSwitch> {
        build_tenant_switch(request_url, tenant_id)
    }
}

fn build_tenant_switch(request_url: &str, tenant_id: &str) -> AppResult<TenantSwitch> {
    let tenant_id = tenant_id.parse::<TenantId>()?;

    let prefix = request_url
        .to_ascii_lowercase()
        .find(TENANT_ROUTE_SEGMENT)
        .map(|index| &request_url[..index])
        .unwrap_or_default();
    let location = if prefix.is_empty() {
        "/".to_owned()
    } else {
        prefix.to_owned()
    };

    Ok(TenantSwitch {
        location,
        cookie: format!("{TENANT_COOKIE_NAME}={tenant_id}; path=/; secure; HttpOnly"),
    })
}

#[cfg(test)]
mod tests;
