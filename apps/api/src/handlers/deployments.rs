use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use launchpad_core::CallerCredential;
use launchpad_domain::DeploymentRequest;
use serde_json::Value;

use crate::dto::{
    DeployResponse, DeploymentStatusResponse, PreviewResponse, SiteQuery, TemplateDeploymentQuery,
};
use crate::error::{ApiResult, ErrorResponse};
use crate::state::AppState;

pub async fn preview_handler(
    State(state): State<AppState>,
    Extension(credential): Extension<CallerCredential>,
    Query(query): Query<TemplateDeploymentQuery>,
    Json(parameters): Json<Value>,
) -> ApiResult<Json<PreviewResponse>> {
    let request = DeploymentRequest::new(parameters, query.template_url.as_str())?;
    let result = state
        .deployment_service
        .preview(
            credential.token(),
            query.subscription_id.as_str(),
            &request,
        )
        .await?;

    Ok(Json(PreviewResponse {
        providers: result.referenced_providers,
    }))
}

pub async fn deploy_handler(
    State(state): State<AppState>,
    Extension(credential): Extension<CallerCredential>,
    Query(query): Query<TemplateDeploymentQuery>,
    Json(parameters): Json<Value>,
) -> ApiResult<Response> {
    let request = DeploymentRequest::new(parameters, query.template_url.as_str())?;
    let result = state
        .deployment_service
        .deploy(
            credential.token(),
            query.subscription_id.as_str(),
            &request,
        )
        .await?;

    let status = StatusCode::from_u16(result.status_code).unwrap_or(StatusCode::BAD_REQUEST);
    if result.is_failure() {
        let body = ErrorResponse {
            error: result.error_message.unwrap_or_default(),
            error_code: result.error_code,
        };
        return Ok((status, Json(body)).into_response());
    }

    Ok((status, Json(DeployResponse {})).into_response())
}

pub async fn deployment_status_handler(
    State(state): State<AppState>,
    Extension(credential): Extension<CallerCredential>,
    Query(query): Query<SiteQuery>,
) -> ApiResult<Json<DeploymentStatusResponse>> {
    let status = state
        .deployment_status_service
        .deployment_status(
            credential.token(),
            query.subscription_id.as_str(),
            query.site_name.as_str(),
        )
        .await?;

    Ok(Json(DeploymentStatusResponse::from(status)))
}

pub async fn git_status_handler(
    State(state): State<AppState>,
    Extension(credential): Extension<CallerCredential>,
    Query(query): Query<SiteQuery>,
) -> ApiResult<Json<Value>> {
    // Dropping the handler future (client disconnect) cancels the poll.
    let cancellation = state.shutdown.child_token();
    let _guard = cancellation.clone().drop_guard();

    let entry = state
        .deployment_status_service
        .git_deployment_status(
            credential.token(),
            query.subscription_id.as_str(),
            query.site_name.as_str(),
            &cancellation,
        )
        .await?;

    Ok(Json(entry))
}
