use serde::{Deserialize, Serialize};

use crate::token::Claims;

/// Directory tenant visible to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tenant {
    /// Human-readable tenant name.
    pub display_name: String,
    /// Primary domain of the tenant.
    pub domain_name: String,
    /// Tenant identifier.
    pub tenant_id: String,
    /// Whether the tenant matches the caller's token.
    #[serde(rename = "Current", default)]
    pub is_current: bool,
}

impl Tenant {
    /// Builds a tenant from a bare identifier.
    ///
    /// The control-plane listing only carries the identifier, so it doubles as
    /// display and domain name.
    #[must_use]
    pub fn from_tenant_id(tenant_id: impl Into<String>) -> Self {
        let tenant_id = tenant_id.into();
        Self {
            display_name: tenant_id.clone(),
            domain_name: tenant_id.clone(),
            tenant_id,
            is_current: false,
        }
    }
}

/// Stamps `is_current` on every tenant whose id matches the `tid` claim.
///
/// Uniqueness is not asserted: duplicated upstream entries are all marked.
#[must_use]
pub fn mark_current_tenants(mut tenants: Vec<Tenant>, claims: &Claims) -> Vec<Tenant> {
    let current = claims.tenant_id();
    for tenant in &mut tenants {
        tenant.is_current = current == Some(tenant.tenant_id.as_str());
    }

    tenants
}
