//! Template validation ("preview") and execution ("deploy").

use std::sync::Arc;

use launchpad_core::{AccessToken, AppError, AppResult};
use launchpad_domain::{DeploymentRequest, DeploymentResult, ProviderMap, ResourceGroup};
use tracing::{info, warn};

use crate::cleanup_ports::CleanupScheduler;
use crate::control_plane_ports::{ControlPlaneClient, DeploymentValidation};
use crate::settings::OrchestrationSettings;

/// Application service submitting templates to the control plane.
#[derive(Clone)]
pub struct DeploymentService {
    control_plane: Arc<dyn ControlPlaneClient>,
    cleanup_scheduler: Arc<dyn CleanupScheduler>,
    provider_map: Arc<ProviderMap>,
    default_location: String,
    default_site_name: String,
}

impl DeploymentService {
    /// Creates a deployment service.
    #[must_use]
    pub fn new(
        control_plane: Arc<dyn ControlPlaneClient>,
        cleanup_scheduler: Arc<dyn CleanupScheduler>,
        provider_map: Arc<ProviderMap>,
        settings: &OrchestrationSettings,
    ) -> Self {
        Self {
            control_plane,
            cleanup_scheduler,
            provider_map,
            default_location: settings.default_location.clone(),
            default_site_name: settings.default_site_name.clone(),
        }
    }

    /// Validates the template inside a throwaway resource group.
    ///
    /// The group is handed to the cleanup scheduler once creation succeeded,
    /// whatever the validation outcome. A rejected validation surfaces as
    /// `AppError::CloudValidation` carrying the upstream status code.
    pub async fn preview(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        request: &DeploymentRequest,
    ) -> AppResult<DeploymentResult> {
        let resource_group = ResourceGroup::ephemeral(self.default_location.as_str())?;
        let write = self
            .control_plane
            .create_or_update_resource_group(token, subscription_id, &resource_group)
            .await?;

        let validation = self
            .control_plane
            .validate_deployment(
                token,
                subscription_id,
                resource_group.name(),
                resource_group.name(),
                request,
            )
            .await;

        if write.is_created_or_ok() {
            self.cleanup_scheduler.schedule_resource_group_deletion(
                token.clone(),
                subscription_id.to_owned(),
                resource_group.name().to_owned(),
            );
        } else {
            warn!(
                resource_group = resource_group.name(),
                status_code = write.status_code,
                "validation resource group was not created, skipping cleanup"
            );
        }

        match validation? {
            DeploymentValidation::Valid {
                provider_namespaces,
            } => {
                let providers = self
                    .provider_map
                    .labels_for(provider_namespaces.iter().map(String::as_str));
                info!(
                    resource_group = resource_group.name(),
                    provider_count = providers.len(),
                    "template validated"
                );
                Ok(DeploymentResult::validated(providers))
            }
            DeploymentValidation::Rejected { status_code } => {
                info!(
                    resource_group = resource_group.name(),
                    status_code, "template validation rejected"
                );
                Err(AppError::CloudValidation { status_code })
            }
        }
    }

    /// Creates or updates the resource group named after the site and
    /// deploys the template into it.
    ///
    /// Control-plane failures are reported inside the returned result.
    pub async fn deploy(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        request: &DeploymentRequest,
    ) -> AppResult<DeploymentResult> {
        let name = request
            .site_name()
            .unwrap_or(self.default_site_name.as_str())
            .to_owned();

        match self.submit(token, subscription_id, name.as_str(), request).await {
            Ok(result) => Ok(result),
            Err(AppError::CloudOperation { code, message, .. }) => {
                warn!(
                    resource_group = %name,
                    error_code = %code,
                    "deployment submission failed"
                );
                Ok(DeploymentResult::failed(code, message))
            }
            Err(error) => Err(error),
        }
    }

    async fn submit(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        name: &str,
        request: &DeploymentRequest,
    ) -> AppResult<DeploymentResult> {
        let resource_group = ResourceGroup::new(name, self.default_location.as_str())?;
        self.control_plane
            .create_or_update_resource_group(token, subscription_id, &resource_group)
            .await?;

        let provisioning_state = self
            .control_plane
            .create_or_update_deployment(token, subscription_id, name, name, request)
            .await?;
        info!(
            resource_group = name,
            provisioning_state = provisioning_state
                .as_ref()
                .map(|state| state.as_str())
                .unwrap_or("unknown"),
            "deployment submitted"
        );

        Ok(DeploymentResult::submitted(provisioning_state))
    }
}
