use serde::{Deserialize, Serialize};

/// Result of a resource-group create-or-update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceGroupWrite {
    /// Status code returned by the control plane.
    pub status_code: u16,
}

impl ResourceGroupWrite {
    /// Returns whether the group now exists (`201 Created` or `200 OK`).
    #[must_use]
    pub fn is_created_or_ok(&self) -> bool {
        matches!(self.status_code, 200 | 201)
    }
}

/// Result of a validate-only deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentValidation {
    /// Control plane answered `200 OK`.
    Valid {
        /// Resource-provider namespaces referenced by the template, in upstream order.
        provider_namespaces: Vec<String>,
    },
    /// Control plane answered with any other status.
    Rejected {
        /// Status code to surface to the caller.
        status_code: u16,
    },
}

/// Resource type registered by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResourceType {
    /// Resource type name, for example `sites`.
    pub resource_type: String,
    /// Regions where the resource type can be deployed.
    #[serde(default)]
    pub locations: Vec<String>,
}

/// Provider metadata used to enumerate deployment locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider namespace.
    pub namespace: String,
    /// Resource types registered by the provider.
    #[serde(default)]
    pub resource_types: Vec<ProviderResourceType>,
}

impl ProviderMetadata {
    /// Returns usable locations for `resource_type`, skipping internal regions.
    #[must_use]
    pub fn public_locations(&self, resource_type: &str) -> Vec<String> {
        self.resource_types
            .iter()
            .find(|candidate| candidate.resource_type.eq_ignore_ascii_case(resource_type))
            .map(|candidate| {
                candidate
                    .locations
                    .iter()
                    .filter(|location| !location.to_ascii_uppercase().contains("MSFT"))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Raw upstream response relayed by the pass-through proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxiedResponse {
    /// Upstream status code.
    pub status_code: u16,
    /// Upstream content type, if any.
    pub content_type: Option<String>,
    /// Upstream body bytes.
    pub body: Vec<u8>,
}
