use axum::body::Body;
use axum::extract::{Extension, OriginalUri, Path, State};
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use launchpad_core::{AppError, CallerCredential};
use tracing::debug;

use crate::error::ApiResult;
use crate::handlers::tenants::{list_tenants, switch_tenant};
use crate::state::AppState;

const TENANTS_PREFIX: &str = "tenants";

pub async fn arm_root_handler(OriginalUri(uri): OriginalUri) -> Response {
    let location = format!("{}/subscriptions", uri.path().trim_end_matches('/'));
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}

pub async fn arm_proxy_handler(
    State(state): State<AppState>,
    Extension(credential): Extension<CallerCredential>,
    Path(path): Path<String>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let segments = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>();
    if segments
        .first()
        .is_some_and(|segment| segment.eq_ignore_ascii_case(TENANTS_PREFIX))
    {
        return match segments.get(1) {
            Some(tenant_id) => switch_tenant(&state, tenant_id, &headers, &uri),
            None => Ok(list_tenants(&state, &credential, &headers, &uri)
                .await?
                .into_response()),
        };
    }

    let target = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };
    debug!(path = %target, "proxying control plane request");

    let proxied = state
        .control_plane
        .proxy_get(credential.token(), target.as_str())
        .await?;

    let mut builder = Response::builder().status(
        StatusCode::from_u16(proxied.status_code).unwrap_or(StatusCode::BAD_GATEWAY),
    );
    if let Some(content_type) = proxied.content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }

    builder.body(Body::from(proxied.body)).map_err(|error| {
        AppError::Internal(format!("failed to build proxied response: {error}")).into()
    })
}
