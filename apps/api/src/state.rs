use std::sync::Arc;

use launchpad_application::{
    ControlPlaneClient, DeploymentService, DeploymentStatusService, SiteNameAllocator,
    TemplateService, TenantService,
};
use tokio_util::sync::CancellationToken;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub tenant_service: TenantService,
    pub template_service: TemplateService,
    pub deployment_service: DeploymentService,
    pub deployment_status_service: DeploymentStatusService,
    pub site_name_allocator: SiteNameAllocator,
    pub control_plane: Arc<dyn ControlPlaneClient>,
    pub shutdown: CancellationToken,
}
