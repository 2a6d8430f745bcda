//! Bearer token payload decoding.
//!
//! Only the middle segment of a compact token is read. Signatures are never
//! checked here: the authenticating front end has already done that.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use launchpad_core::{AppError, AppResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Claim name carrying the directory tenant of the caller.
pub const TENANT_ID_CLAIM: &str = "tid";

/// Claims decoded from a bearer token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Wraps an already decoded claim mapping.
    #[must_use]
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Returns a claim value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns the caller tenant (`tid`) claim, if present as a string.
    #[must_use]
    pub fn tenant_id(&self) -> Option<&str> {
        self.get(TENANT_ID_CLAIM).and_then(Value::as_str)
    }

    /// Returns the claim mapping.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Number of `=` characters needed to complete a base64 segment of `length`.
///
/// A remainder of 1 can never come out of a base64 encoder and is rejected.
pub fn base64_padding(length: usize) -> AppResult<usize> {
    match length % 4 {
        0 => Ok(0),
        2 => Ok(2),
        3 => Ok(1),
        _ => Err(AppError::MalformedToken(format!(
            "payload segment length {length} is not a valid base64 length"
        ))),
    }
}

/// Decodes the payload segment of a compact token into its JSON text.
pub fn decode_token_payload(token: &str) -> AppResult<String> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::MalformedToken("token is empty".to_owned()));
    }

    let segment = token
        .split('.')
        .nth(1)
        .ok_or_else(|| AppError::MalformedToken("token has no payload segment".to_owned()))?;

    let mut normalized: String = segment
        .chars()
        .map(|symbol| match symbol {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let padding = base64_padding(normalized.len())?;
    normalized.extend(std::iter::repeat_n('=', padding));

    let bytes = STANDARD
        .decode(normalized.as_bytes())
        .map_err(|error| AppError::MalformedToken(format!("invalid base64 payload: {error}")))?;

    String::from_utf8(bytes)
        .map_err(|error| AppError::MalformedToken(format!("payload is not UTF-8: {error}")))
}

/// Decodes the payload segment of a compact token into claims.
pub fn decode_token_claims(token: &str) -> AppResult<Claims> {
    let payload = decode_token_payload(token)?;
    match serde_json::from_str::<Value>(payload.as_str()) {
        Ok(Value::Object(claims)) => Ok(Claims(claims)),
        Ok(_) => Err(AppError::MalformedToken(
            "payload is not a JSON object".to_owned(),
        )),
        Err(error) => Err(AppError::MalformedToken(format!(
            "payload is not valid JSON: {error}"
        ))),
    }
}
