//! Deployment progress reporting.

use std::sync::Arc;
use std::time::Duration;

use launchpad_core::{AccessToken, AppError, AppResult};
use launchpad_domain::ProvisioningState;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::control_plane_ports::ControlPlaneClient;
use crate::settings::OrchestrationSettings;

const NO_GIT_DEPLOYMENTS: &str = "Could not find any git deployments";

/// Snapshot of a template deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentStatus {
    /// Provisioning state reported by the control plane.
    pub provisioning_state: ProvisioningState,
    /// Raw operations log.
    pub operations: Value,
    /// `http://{host}` once the deployment succeeded.
    pub site_url: Option<String>,
}

/// Application service reading deployment progress.
#[derive(Clone)]
pub struct DeploymentStatusService {
    control_plane: Arc<dyn ControlPlaneClient>,
    git_status_attempts: u8,
    git_status_interval: Duration,
}

impl DeploymentStatusService {
    /// Creates a deployment status service.
    #[must_use]
    pub fn new(control_plane: Arc<dyn ControlPlaneClient>, settings: &OrchestrationSettings) -> Self {
        Self {
            control_plane,
            git_status_attempts: settings.git_status_attempts,
            git_status_interval: settings.git_status_interval,
        }
    }

    /// Reads the state and operations of the deployment named after the site.
    pub async fn deployment_status(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        site_name: &str,
    ) -> AppResult<DeploymentStatus> {
        let (provisioning_state, operations) = tokio::join!(
            self.control_plane
                .get_deployment_state(token, subscription_id, site_name, site_name),
            self.control_plane
                .get_deployment_operations(token, subscription_id, site_name),
        );
        let provisioning_state = provisioning_state?;
        let operations = operations?;

        let site_url = if provisioning_state == ProvisioningState::Succeeded {
            self.control_plane
                .get_site_host_names(token, subscription_id, site_name)
                .await?
                .into_iter()
                .next()
                .map(|host| format!("http://{host}"))
        } else {
            None
        };

        Ok(DeploymentStatus {
            provisioning_state,
            operations,
            site_url,
        })
    }

    /// Polls the site's git deployment log until it has an entry.
    ///
    /// Returns the newest entry, `AppError::NotFoundExhausted` once every
    /// attempt came back empty, or `AppError::Cancelled` when `cancellation`
    /// fires first. Upstream failures end the loop immediately.
    pub async fn git_deployment_status(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        site_name: &str,
        cancellation: &CancellationToken,
    ) -> AppResult<Value> {
        for attempt in 1..=self.git_status_attempts {
            let entries = tokio::select! {
                biased;
                () = cancellation.cancelled() => return Err(cancelled(site_name)),
                entries = self
                    .control_plane
                    .list_site_deployments(token, subscription_id, site_name) => entries?,
            };

            if let Some(latest) = entries.into_iter().next() {
                debug!(attempt, site_name, "git deployment found");
                return Ok(latest);
            }

            debug!(attempt, site_name, "git deployment log empty");
            if attempt < self.git_status_attempts {
                tokio::select! {
                    biased;
                    () = cancellation.cancelled() => return Err(cancelled(site_name)),
                    () = tokio::time::sleep(self.git_status_interval) => {}
                }
            }
        }

        Err(AppError::NotFoundExhausted(NO_GIT_DEPLOYMENTS.to_owned()))
    }
}

fn cancelled(site_name: &str) -> AppError {
    AppError::Cancelled(format!(
        "git deployment status polling for '{site_name}' was cancelled"
    ))
}
