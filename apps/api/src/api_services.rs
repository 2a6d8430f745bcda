use std::sync::Arc;

use launchpad_application::{
    CleanupScheduler, ControlPlaneClient, DeploymentService, DeploymentStatusService,
    SiteNameAllocator, TemplateService, TenantService,
};
use launchpad_core::AppError;
use launchpad_domain::ProviderMap;
use launchpad_infrastructure::{
    ArmControlPlaneClient, HttpTemplateSource, HttpTenantDirectory, TokioCleanupScheduler,
};
use tokio_util::sync::CancellationToken;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_http_client(config: &ApiConfig) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))
}

pub fn build_app_state(
    config: &ApiConfig,
    shutdown: CancellationToken,
) -> Result<AppState, AppError> {
    let http_client = build_http_client(config)?;
    let settings = &config.orchestration;

    let control_plane: Arc<dyn ControlPlaneClient> = Arc::new(ArmControlPlaneClient::new(
        http_client.clone(),
        config.control_plane_url.as_str(),
        config.control_plane_api_version.as_str(),
    )?);
    let cleanup_scheduler: Arc<dyn CleanupScheduler> =
        Arc::new(TokioCleanupScheduler::new(control_plane.clone()));

    let tenant_service = TenantService::new(
        control_plane.clone(),
        Arc::new(HttpTenantDirectory::new(
            http_client.clone(),
            config.tenant_details_url.as_str(),
        )?),
    );
    let site_name_allocator = SiteNameAllocator::new(control_plane.clone(), settings);
    let template_service = TemplateService::new(
        Arc::new(HttpTemplateSource::new(http_client)),
        control_plane.clone(),
        tenant_service.clone(),
        site_name_allocator.clone(),
        settings,
    );

    Ok(AppState {
        tenant_service,
        template_service,
        deployment_service: DeploymentService::new(
            control_plane.clone(),
            cleanup_scheduler,
            Arc::new(ProviderMap::well_known()),
            settings,
        ),
        deployment_status_service: DeploymentStatusService::new(control_plane.clone(), settings),
        site_name_allocator,
        control_plane,
        shutdown,
    })
}
