use std::sync::Arc;

use launchpad_core::{AccessToken, AppError, AppResult};
use launchpad_domain::{SiteNameCandidate, compose_site_name};
use tracing::debug;

use crate::control_plane_ports::ControlPlaneClient;
use crate::settings::OrchestrationSettings;

/// Generates site names that are free in the public hostname space.
#[derive(Clone)]
pub struct SiteNameAllocator {
    control_plane: Arc<dyn ControlPlaneClient>,
    attempts: u8,
    suffix_length: usize,
}

impl SiteNameAllocator {
    /// Creates an allocator using the attempt and suffix settings.
    #[must_use]
    pub fn new(control_plane: Arc<dyn ControlPlaneClient>, settings: &OrchestrationSettings) -> Self {
        Self {
            control_plane,
            attempts: settings.site_name_attempts,
            suffix_length: settings.site_name_suffix_length,
        }
    }

    /// Returns the first available `base` + random hex suffix, or `None` once
    /// every attempt collided.
    pub async fn allocate(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        base: &str,
    ) -> AppResult<Option<String>> {
        let base = base.trim();
        if base.is_empty() {
            return Ok(None);
        }

        for attempt in 1..=self.attempts {
            let candidate = compose_site_name(base, &self.random_suffix()?);
            let candidate = self
                .check_availability(token, subscription_id, candidate)
                .await?;
            debug!(
                attempt,
                site_name = %candidate.value,
                available = candidate.available,
                "probed site name"
            );
            if candidate.available {
                return Ok(Some(candidate.value));
            }
        }

        Ok(None)
    }

    /// Probes one concrete name.
    pub async fn check_availability(
        &self,
        token: &AccessToken,
        subscription_id: &str,
        value: String,
    ) -> AppResult<SiteNameCandidate> {
        let available = self
            .control_plane
            .is_hostname_available(token, subscription_id, value.as_str())
            .await?;

        Ok(SiteNameCandidate { value, available })
    }

    fn random_suffix(&self) -> AppResult<Vec<u8>> {
        let mut bytes = vec![0_u8; self.suffix_length];
        getrandom::fill(&mut bytes).map_err(|error| {
            AppError::Internal(format!("failed to generate site name suffix: {error}"))
        })?;
        Ok(bytes)
    }
}
