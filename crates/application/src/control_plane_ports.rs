mod client;
mod resources;
mod tenant_directory;

pub use client::ControlPlaneClient;
pub use resources::{
    DeploymentValidation, ProviderMetadata, ProviderResourceType, ProxiedResponse,
    ResourceGroupWrite,
};
pub use tenant_directory::TenantDirectory;
