use axum::Json;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use pandatur_core::{AppError, UserId, UserIdentity};

use crate::error::{ApiResult, ErrorResponse, FailedOperation, status_for};
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Resolves the acting user from the `X-User-Id` header.
pub async fn require_actor(mut request: Request, next: Next) -> ApiResult<Response> {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?
        .parse::<UserId>()
        .map_err(|_| AppError::Unauthorized("invalid user id header".to_owned()))?;

    request
        .extensions_mut()
        .insert(UserIdentity::new(user_id, format!("user-{user_id}")));
    Ok(next.run(request).await)
}

/// Re-renders error bodies with notifications in the configured locale.
pub async fn localize_errors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    let Some(FailedOperation(error)) = response.extensions().get::<FailedOperation>().cloned()
    else {
        return response;
    };

    (
        status_for(&error),
        Json(ErrorResponse::new(&error, state.locale)),
    )
        .into_response()
}
