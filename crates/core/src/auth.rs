use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Opaque bearer token forwarded to upstream APIs on behalf of the caller.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates an access token from a raw header value.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::AuthenticationMissing(
                "bearer token must not be empty".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the raw compact token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Debug for AccessToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("AccessToken(<redacted>)")
    }
}

/// Caller credential and principal headers attached by the authenticating front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerCredential {
    token: AccessToken,
    principal_name: Option<String>,
    display_name: Option<String>,
}

impl CallerCredential {
    /// Creates a caller credential from the forwarded token and principal headers.
    #[must_use]
    pub fn new(
        token: AccessToken,
        principal_name: Option<String>,
        display_name: Option<String>,
    ) -> Self {
        Self {
            token,
            principal_name: non_blank(principal_name),
            display_name: non_blank(display_name),
        }
    }

    /// Returns the bearer token.
    #[must_use]
    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Returns the principal name (usually an email), if present.
    #[must_use]
    pub fn principal_name(&self) -> Option<&str> {
        self.principal_name.as_deref()
    }

    /// Returns the display name, falling back to the principal name.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .or(self.principal_name.as_deref())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim().to_owned();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}
