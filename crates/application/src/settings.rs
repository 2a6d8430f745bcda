use std::time::Duration;

use launchpad_domain::GITHUB_RAW_BASE_URL;

/// Tunables shared by the orchestration services.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestrationSettings {
    /// Region used for every resource group this service creates.
    pub default_location: String,
    /// Resource group and deployment name used when the caller omits `siteName`.
    pub default_site_name: String,
    /// Availability probes made before giving up on a generated site name.
    pub site_name_attempts: u8,
    /// Random hex symbols appended to the site-name base.
    pub site_name_suffix_length: usize,
    /// Reads of the git deployment log before reporting nothing was found.
    pub git_status_attempts: u8,
    /// Pause between two git deployment log reads.
    pub git_status_interval: Duration,
    /// Root of the raw-content host used for template downloads.
    pub source_raw_base_url: String,
}

impl Default for OrchestrationSettings {
    fn default() -> Self {
        Self {
            default_location: "East US".to_owned(),
            default_site_name: "mySite".to_owned(),
            site_name_attempts: 3,
            site_name_suffix_length: 4,
            git_status_attempts: 5,
            git_status_interval: Duration::from_secs(1),
            source_raw_base_url: GITHUB_RAW_BASE_URL.to_owned(),
        }
    }
}
