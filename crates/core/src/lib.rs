//! Shared primitives for all Rust crates in Launchpad.

#![forbid(unsafe_code)]

/// Caller credential primitives shared across services.
pub mod auth;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use auth::{AccessToken, CallerCredential};

/// Result type used across Launchpad crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Directory tenant identifier used when switching the active tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(Uuid);

impl TenantId {
    /// Creates a tenant identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl FromStr for TenantId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid tenant id '{value}': {error}")))
    }
}

impl Display for TenantId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// No bearer token was presented where one is required.
    #[error("authentication required: {0}")]
    AuthenticationMissing(String),

    /// Bearer token payload could not be decoded into claims.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Repository URL points at a host without a registered strategy.
    #[error("unsupported repository host: {0}")]
    UnsupportedRepositoryHost(String),

    /// Control plane rejected a validate-only deployment.
    #[error("deployment validation failed with status {status_code}")]
    CloudValidation {
        /// Status code reported by the control plane.
        status_code: u16,
    },

    /// Control plane call failed while creating or executing resources.
    #[error("control plane error {code}: {message}")]
    CloudOperation {
        /// Status code reported by the control plane.
        status_code: u16,
        /// Upstream error code.
        code: String,
        /// Upstream error message.
        message: String,
    },

    /// Upstream responded with a non-success status that is passed through verbatim.
    #[error("upstream responded with status {status_code}")]
    Upstream {
        /// Upstream status code.
        status_code: u16,
        /// Raw upstream body.
        body: String,
    },

    /// Bounded polling finished without a usable result.
    #[error("{0}")]
    NotFoundExhausted(String),

    /// Best-effort cleanup of an ephemeral resource failed.
    #[error("cleanup failure: {0}")]
    CleanupFailure(String),

    /// Work was abandoned because the caller went away or the server is stopping.
    #[error("cancelled: {0}")]
    Cancelled(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString, TenantId};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn tenant_id_parses_uuid_text() {
        let tenant_id = "72f988bf-86f1-41af-91ab-2d7cd011db47".parse::<TenantId>();
        assert!(tenant_id.is_ok());
        assert_eq!(
            tenant_id.unwrap_or_else(|_| unreachable!()).to_string(),
            "72f988bf-86f1-41af-91ab-2d7cd011db47"
        );
    }

    #[test]
    fn tenant_id_rejects_non_uuid_text() {
        let tenant_id = "contoso".parse::<TenantId>();
        assert!(matches!(tenant_id, Err(AppError::Validation(_))));
    }

    #[test]
    fn cloud_operation_error_formats_code_and_message() {
        let error = AppError::CloudOperation {
            status_code: 409,
            code: "Conflict".to_owned(),
            message: "group is being deleted".to_owned(),
        };
        assert_eq!(
            error.to_string(),
            "control plane error Conflict: group is being deleted"
        );
    }
}
