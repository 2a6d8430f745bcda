use axum::Json;
use axum::extract::{Extension, Query, State};
use launchpad_core::CallerCredential;

use crate::dto::{SiteAvailabilityResponse, SiteQuery};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn site_availability_handler(
    State(state): State<AppState>,
    Extension(credential): Extension<CallerCredential>,
    Query(query): Query<SiteQuery>,
) -> ApiResult<Json<SiteAvailabilityResponse>> {
    let candidate = state
        .site_name_allocator
        .check_availability(
            credential.token(),
            query.subscription_id.as_str(),
            query.site_name,
        )
        .await?;

    Ok(Json(SiteAvailabilityResponse {
        site_name: candidate.value,
        is_available: candidate.available,
    }))
}
