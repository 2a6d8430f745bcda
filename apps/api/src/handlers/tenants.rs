use axum::Json;
use axum::extract::{Extension, OriginalUri, Path, State};
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use launchpad_core::CallerCredential;

use crate::dto::TenantResponse;
use crate::error::ApiResult;
use crate::request_context::{request_url, tenant_source};
use crate::state::AppState;

pub async fn list_tenants_handler(
    State(state): State<AppState>,
    Extension(credential): Extension<CallerCredential>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<TenantResponse>>> {
    list_tenants(&state, &credential, &headers, &uri).await
}

pub async fn switch_tenant_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> ApiResult<Response> {
    switch_tenant(&state, tenant_id.as_str(), &headers, &uri)
}

pub(crate) async fn list_tenants(
    state: &AppState,
    credential: &CallerCredential,
    headers: &HeaderMap,
    uri: &Uri,
) -> ApiResult<Json<Vec<TenantResponse>>> {
    let tenants = state
        .tenant_service
        .list_tenants(credential, &tenant_source(headers, uri))
        .await?
        .into_iter()
        .map(TenantResponse::from)
        .collect();

    Ok(Json(tenants))
}

pub(crate) fn switch_tenant(
    state: &AppState,
    tenant_id: &str,
    headers: &HeaderMap,
    uri: &Uri,
) -> ApiResult<Response> {
    let switch = state
        .tenant_service
        .switch_tenant(request_url(headers, uri).as_str(), tenant_id)?;

    Ok((
        StatusCode::FOUND,
        [(LOCATION, switch.location), (SET_COOKIE, switch.cookie)],
    )
        .into_response())
}
