use axum::extract::{Extension, Query};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use launchpad_core::CallerCredential;
use launchpad_domain::decode_token_payload;

use crate::dto::TokenQuery;
use crate::error::ApiResult;

pub async fn token_handler(
    Extension(credential): Extension<CallerCredential>,
    Query(query): Query<TokenQuery>,
) -> ApiResult<Response> {
    let token = credential.token().as_str();
    if query.plain_text {
        return Ok(([(CONTENT_TYPE, "text/plain; charset=utf-8")], token.to_owned()).into_response());
    }

    let payload = decode_token_payload(token)?;
    Ok(([(CONTENT_TYPE, "application/json; charset=utf-8")], payload).into_response())
}
