use axum::Json;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use launchpad_core::AppError;
use serde::Serialize;
use tracing::error;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "errorCode", skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Validation(_)
            | AppError::MalformedToken(_)
            | AppError::UnsupportedRepositoryHost(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationMissing(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) | AppError::NotFoundExhausted(_) => StatusCode::NOT_FOUND,
            AppError::Cancelled(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::CloudOperation { .. } => StatusCode::BAD_GATEWAY,
            AppError::CloudValidation { status_code } => upstream_status(*status_code),
            AppError::Upstream { status_code, .. } => upstream_status(*status_code),
            AppError::CleanupFailure(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        match self.0 {
            AppError::CloudValidation { .. } => status.into_response(),
            AppError::Upstream { body, .. } => {
                let content_type = if looks_like_json(body.as_str()) {
                    "application/json"
                } else {
                    "text/plain; charset=utf-8"
                };
                (status, [(CONTENT_TYPE, content_type)], body).into_response()
            }
            AppError::CloudOperation { code, message, .. } => (
                status,
                Json(ErrorResponse {
                    error: message,
                    error_code: Some(code),
                }),
            )
                .into_response(),
            other => {
                if status.is_server_error() {
                    error!(error = %other, "request failed");
                }

                let error = match other {
                    AppError::NotFound(message) | AppError::NotFoundExhausted(message) => message,
                    other => other.to_string(),
                };
                (
                    status,
                    Json(ErrorResponse {
                        error,
                        error_code: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

fn upstream_status(status_code: u16) -> StatusCode {
    StatusCode::from_u16(status_code).unwrap_or(StatusCode::BAD_GATEWAY)
}

fn looks_like_json(body: &str) -> bool {
    matches!(body.trim_start().chars().next(), Some('{' | '['))
}
