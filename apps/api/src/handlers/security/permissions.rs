use pandatur_domain::{AccessContext, Action, Category, encode};

use super::*;

pub async fn permission_vocabulary_handler(
    State(state): State<AppState>,
) -> Json<PermissionVocabularyResponse> {
    Json(PermissionVocabularyResponse::build(state.locale))
}

pub async fn check_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CheckPermissionRequest>,
) -> ApiResult<Json<CheckPermissionResponse>> {
    let category = payload.category.parse::<Category>()?;
    let action = payload.action.parse::<Action>()?;
    let context = AccessContext {
        responsible_id: payload.responsible_id,
        skip_context_check: payload.skip_context_check,
    };

    let decision = state
        .authorization_service
        .resolve_access(&user, category, action, &context)
        .await?;

    Ok(Json(CheckPermissionResponse {
        allowed: decision.is_granted(),
        decision: decision.to_string(),
    }))
}

pub async fn my_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<MyPermissionsResponse>> {
    let matrix = state.authorization_service.actor_matrix(&user).await?;

    Ok(Json(MyPermissionsResponse {
        user_id: user.user_id().as_i64(),
        roles: encode(&matrix).into_iter().map(String::from).collect(),
    }))
}
