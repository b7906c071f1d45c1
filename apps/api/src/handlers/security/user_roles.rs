use pandatur_application::UserRoleDetails;
use pandatur_domain::UserRoles;

use super::*;

pub async fn user_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserRolesResponse>> {
    let details = state
        .security_admin_service
        .user_roles(&user, UserId::new(user_id))
        .await?;

    Ok(Json(UserRolesResponse::from(details)))
}

pub async fn update_user_roles_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateUserRolesRequest>,
) -> ApiResult<Json<UserRolesResponse>> {
    let record = state
        .security_admin_service
        .update_user_roles(&user, UserId::new(user_id), payload.roles)
        .await?;

    stored_record_response(&state, record).await
}

pub async fn assign_permission_group_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
    Json(payload): Json<AssignPermissionGroupRequest>,
) -> ApiResult<Json<UserRolesResponse>> {
    let record = state
        .security_admin_service
        .assign_permission_group(&user, UserId::new(user_id), payload.permission_id)
        .await?;

    stored_record_response(&state, record).await
}

pub async fn remove_permission_group_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserRolesResponse>> {
    let record = state
        .security_admin_service
        .remove_permission_group(&user, UserId::new(user_id))
        .await?;

    stored_record_response(&state, record).await
}

async fn stored_record_response(
    state: &AppState,
    record: UserRoles,
) -> ApiResult<Json<UserRolesResponse>> {
    let group = state.authorization_service.assigned_group(&record).await?;
    let effective = record.effective_roles(group.as_ref());

    Ok(Json(UserRolesResponse::from(UserRoleDetails {
        record,
        group,
        effective,
    })))
}
