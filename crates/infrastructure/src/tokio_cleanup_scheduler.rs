use std::sync::Arc;

use launchpad_application::{CleanupScheduler, ControlPlaneClient};
use launchpad_core::{AccessToken, AppError};
use tracing::{debug, warn};

/// Runs resource-group deletions on detached tokio tasks.
///
/// Deletions are attempted once. Failures are logged and dropped.
pub struct TokioCleanupScheduler {
    control_plane: Arc<dyn ControlPlaneClient>,
}

impl TokioCleanupScheduler {
    /// Creates a scheduler deleting through `control_plane`.
    #[must_use]
    pub fn new(control_plane: Arc<dyn ControlPlaneClient>) -> Self {
        Self { control_plane }
    }
}

impl CleanupScheduler for TokioCleanupScheduler {
    fn schedule_resource_group_deletion(
        &self,
        token: AccessToken,
        subscription_id: String,
        resource_group_name: String,
    ) {
        let control_plane = Arc::clone(&self.control_plane);
        tokio::spawn(async move {
            let outcome = control_plane
                .delete_resource_group(&token, subscription_id.as_str(), resource_group_name.as_str())
                .await;

            match outcome {
                Ok(()) => debug!(
                    subscription_id = %subscription_id,
                    resource_group = %resource_group_name,
                    "validation resource group deleted"
                ),
                Err(error) => {
                    let error = AppError::CleanupFailure(format!(
                        "failed to delete resource group '{resource_group_name}': {error}"
                    ));
                    warn!(
                        cleanup_failure = true,
                        subscription_id = %subscription_id,
                        resource_group = %resource_group_name,
                        error = %error,
                        "resource group cleanup failed"
                    );
                }
            }
        });
    }
}
