//! Application services and ports.

#![forbid(unsafe_code)]

mod cleanup_ports;
mod control_plane_ports;
mod deployment_service;
mod deployment_status_service;
mod settings;
mod site_name_allocator;
mod source_ports;
mod template_service;
mod tenant_service;

#[cfg(test)]
mod test_support;

pub use cleanup_ports::CleanupScheduler;
pub use control_plane_ports::{
    ControlPlaneClient, DeploymentValidation, ProviderMetadata, ProviderResourceType,
    ProxiedResponse, ResourceGroupWrite, TenantDirectory,
};
pub use deployment_service::DeploymentService;
pub use deployment_status_service::{DeploymentStatus, DeploymentStatusService};
pub use settings::OrchestrationSettings;
pub use site_name_allocator::SiteNameAllocator;
pub use source_ports::TemplateSource;
pub use template_service::{TemplateDiscovery, TemplateService};
pub use tenant_service::{TENANT_COOKIE_NAME, TenantService, TenantSource, TenantSwitch};
