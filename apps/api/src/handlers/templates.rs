use axum::Json;
use axum::extract::{Extension, OriginalUri, Query, State};
use axum::http::HeaderMap;
use launchpad_core::CallerCredential;

use crate::dto::{RepositoryQuery, TemplateDiscoveryResponse};
use crate::error::ApiResult;
use crate::request_context::tenant_source;
use crate::state::AppState;

pub async fn discover_template_handler(
    State(state): State<AppState>,
    Extension(credential): Extension<CallerCredential>,
    Query(query): Query<RepositoryQuery>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> ApiResult<Json<TemplateDiscoveryResponse>> {
    let discovery = state
        .template_service
        .discover(
            &credential,
            query.repository_url.as_str(),
            &tenant_source(&headers, &uri),
        )
        .await?;

    Ok(Json(TemplateDiscoveryResponse::from(discovery)))
}
