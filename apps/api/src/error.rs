use std::sync::Arc;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pandatur_application::Notification;
use pandatur_core::AppError;
use pandatur_domain::Locale;
use serde::Serialize;
use ts_rs::TS;

use crate::dto::NotificationResponse;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    message: String,
    notification: NotificationResponse,
}

impl ErrorResponse {
    pub fn new(error: &AppError, locale: Locale) -> Self {
        Self {
            message: error.to_string(),
            notification: Notification::from_app_error(error, locale).into(),
        }
    }
}

/// Application error attached to error responses so outer layers can
/// re-render the body for the configured locale.
#[derive(Debug, Clone)]
pub struct FailedOperation(pub Arc<AppError>);

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

pub fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Conflict(_) => StatusCode::CONFLICT,
        AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        let payload = Json(ErrorResponse::new(&self.0, Locale::default()));

        let mut response = (status, payload).into_response();
        response
            .extensions_mut()
            .insert(FailedOperation(Arc::new(self.0)));
        response
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
