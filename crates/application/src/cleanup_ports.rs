use launchpad_core::AccessToken;

/// Port for detached, best-effort removal of ephemeral resources.
///
/// Implementations must return immediately. The deletion outcome is never
/// reported back to the caller and failed deletions are not retried.
pub trait CleanupScheduler: Send + Sync {
    /// Schedules deletion of a resource group created for validation.
    fn schedule_resource_group_deletion(
        &self,
        token: AccessToken,
        subscription_id: String,
        resource_group_name: String,
    );
}
