//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod arm_control_plane_client;
mod http_template_source;
mod http_tenant_directory;
mod tokio_cleanup_scheduler;

pub use arm_control_plane_client::ArmControlPlaneClient;
pub use http_template_source::HttpTemplateSource;
pub use http_tenant_directory::HttpTenantDirectory;
pub use tokio_cleanup_scheduler::TokioCleanupScheduler;
