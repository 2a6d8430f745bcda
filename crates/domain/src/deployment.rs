use launchpad_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;
use uuid::Uuid;

/// Resource group targeted by a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup {
    name: NonEmptyString,
    location: NonEmptyString,
}

impl ResourceGroup {
    /// Creates a validated resource group descriptor.
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            location: NonEmptyString::new(location)?,
        })
    }

    /// Creates a throwaway group with a freshly generated unique name.
    pub fn ephemeral(location: impl Into<String>) -> AppResult<Self> {
        Self::new(Uuid::new_v4().to_string(), location)
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the group region.
    #[must_use]
    pub fn location(&self) -> &str {
        self.location.as_str()
    }
}

/// How the control plane should treat a submitted deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    /// Check the template and parameters without provisioning anything.
    ValidateOnly,
    /// Provision resources.
    Apply,
}

/// Template plus caller parameters submitted to the control plane.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentRequest {
    parameters: Value,
    template_url: Url,
}

impl DeploymentRequest {
    /// Creates a deployment request, validating the template URL.
    pub fn new(parameters: Value, template_url: &str) -> AppResult<Self> {
        let template_url = Url::parse(template_url.trim()).map_err(|error| {
            AppError::Validation(format!("invalid template url '{template_url}': {error}"))
        })?;
        if !matches!(template_url.scheme(), "http" | "https") {
            return Err(AppError::Validation(format!(
                "template url must use http or https, got '{}'",
                template_url.scheme()
            )));
        }

        let parameters = if parameters.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            parameters
        };

        Ok(Self {
            parameters,
            template_url,
        })
    }

    /// Returns the opaque parameters document.
    #[must_use]
    pub fn parameters(&self) -> &Value {
        &self.parameters
    }

    /// Returns the linked template URL.
    #[must_use]
    pub fn template_url(&self) -> &Url {
        &self.template_url
    }

    /// Returns the `siteName` parameter value, if supplied as a non-empty string.
    #[must_use]
    pub fn site_name(&self) -> Option<&str> {
        self.parameters
            .get("siteName")
            .and_then(|parameter| parameter.get("value"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Provisioning state reported for a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningState {
    /// Deployment finished successfully.
    Succeeded,
    /// Deployment failed.
    Failed,
    /// Deployment is still in progress.
    Running,
    /// Deployment was accepted but has not started.
    Accepted,
    /// Deployment was cancelled.
    Canceled,
    /// Any other upstream state.
    Other(String),
}

impl ProvisioningState {
    /// Parses the upstream state string.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            "Running" => Self::Running,
            "Accepted" => Self::Accepted,
            "Canceled" => Self::Canceled,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the upstream state string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Running => "Running",
            Self::Accepted => "Accepted",
            Self::Canceled => "Canceled",
            Self::Other(value) => value.as_str(),
        }
    }
}

/// Outcome of a preview or deploy call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    /// HTTP status reported back to the caller.
    pub status_code: u16,
    /// Provisioning state, when known.
    pub provisioning_state: Option<ProvisioningState>,
    /// Labels of the resource providers the template references.
    pub referenced_providers: Vec<String>,
    /// Upstream error code for failed deployments.
    pub error_code: Option<String>,
    /// Upstream error message for failed deployments.
    pub error_message: Option<String>,
}

impl DeploymentResult {
    /// Successful validation listing referenced providers.
    #[must_use]
    pub fn validated(referenced_providers: Vec<String>) -> Self {
        Self {
            status_code: 200,
            provisioning_state: None,
            referenced_providers,
            error_code: None,
            error_message: None,
        }
    }

    /// Deployment accepted by the control plane.
    #[must_use]
    pub fn submitted(provisioning_state: Option<ProvisioningState>) -> Self {
        Self {
            status_code: 200,
            provisioning_state,
            referenced_providers: Vec::new(),
            error_code: None,
            error_message: None,
        }
    }

    /// Deployment rejected by the control plane.
    #[must_use]
    pub fn failed(error_code: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            status_code: 400,
            provisioning_state: None,
            referenced_providers: Vec::new(),
            error_code: Some(error_code.into()),
            error_message: Some(error_message.into()),
        }
    }

    /// Returns whether the result represents a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.error_code.is_some() || self.error_message.is_some()
    }
}
