use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method};
use launchpad_core::AppError;
use tower_http::cors::CorsLayer;

use crate::middleware::{CLIENT_DISPLAY_NAME_HEADER, CLIENT_PRINCIPAL_NAME_HEADER, OAUTH_TOKEN_HEADER};

pub(super) fn build_cors_layer(frontend_url: &str) -> Result<CorsLayer, AppError> {
    Ok(CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(OAUTH_TOKEN_HEADER),
            HeaderName::from_static(CLIENT_PRINCIPAL_NAME_HEADER),
            HeaderName::from_static(CLIENT_DISPLAY_NAME_HEADER),
        ]))
}
