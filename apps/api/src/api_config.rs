use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use launchpad_application::OrchestrationSettings;
use launchpad_core::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub tenant_details_url: String,
    pub control_plane_url: String,
    pub control_plane_api_version: String,
    pub http_timeout: Duration,
    pub orchestration: OrchestrationSettings,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |name: &str, default: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let defaults = OrchestrationSettings::default();
        let orchestration = OrchestrationSettings {
            default_location: text(
                "DEFAULT_RESOURCE_GROUP_LOCATION",
                defaults.default_location.as_str(),
            ),
            default_site_name: text("DEFAULT_SITE_NAME", defaults.default_site_name.as_str()),
            site_name_attempts: parsed(&lookup, "SITE_NAME_ATTEMPTS", defaults.site_name_attempts)?
                .max(1),
            site_name_suffix_length: parsed(
                &lookup,
                "SITE_NAME_SUFFIX_LENGTH",
                defaults.site_name_suffix_length,
            )?,
            git_status_attempts: parsed(&lookup, "GIT_STATUS_ATTEMPTS", defaults.git_status_attempts)?
                .max(1),
            git_status_interval: Duration::from_millis(parsed(
                &lookup,
                "GIT_STATUS_INTERVAL_MS",
                1_000_u64,
            )?),
            source_raw_base_url: text(
                "SOURCE_RAW_BASE_URL",
                defaults.source_raw_base_url.as_str(),
            ),
        };

        let frontend_url = text("FRONTEND_URL", "http://localhost:3000");

        Ok(Self {
            api_host: text("API_HOST", "127.0.0.1"),
            api_port: parsed(&lookup, "API_PORT", 3001_u16)?,
            tenant_details_url: text("TENANT_DETAILS_URL", frontend_url.as_str()),
            frontend_url,
            control_plane_url: text("CONTROL_PLANE_URL", "https://management.azure.com"),
            control_plane_api_version: text("CONTROL_PLANE_API_VERSION", "2014-04-01"),
            http_timeout: Duration::from_secs(parsed(&lookup, "HTTP_TIMEOUT_SECONDS", 30_u64)?),
            orchestration,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parsed<F, T>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name).filter(|value| !value.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}"))),
        None => Ok(default),
    }
}
