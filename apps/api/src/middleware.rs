use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use launchpad_core::{AccessToken, CallerCredential};

use crate::error::ApiResult;

pub const OAUTH_TOKEN_HEADER: &str = "x-ms-oauth-token";
pub const CLIENT_PRINCIPAL_NAME_HEADER: &str = "x-ms-client-principal-name";
pub const CLIENT_DISPLAY_NAME_HEADER: &str = "x-ms-client-display-name";

pub async fn require_auth(mut request: Request, next: Next) -> ApiResult<Response> {
    let credential = caller_credential(request.headers())?;
    request.extensions_mut().insert(credential);
    Ok(next.run(request).await)
}

fn caller_credential(headers: &HeaderMap) -> ApiResult<CallerCredential> {
    let token = AccessToken::new(header_value(headers, OAUTH_TOKEN_HEADER).unwrap_or_default())?;

    Ok(CallerCredential::new(
        token,
        header_value(headers, CLIENT_PRINCIPAL_NAME_HEADER),
        header_value(headers, CLIENT_DISPLAY_NAME_HEADER),
    ))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
