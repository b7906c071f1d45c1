use pandatur_application::{CreatePermissionGroupInput, UpdatePermissionGroupInput};

use super::*;

pub async fn list_permission_groups_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<PermissionGroupResponse>>> {
    let groups = state
        .security_admin_service
        .list_permission_groups(&user)
        .await?
        .into_iter()
        .map(PermissionGroupResponse::from)
        .collect();

    Ok(Json(groups))
}

pub async fn permission_group_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(permission_id): Path<i64>,
) -> ApiResult<Json<PermissionGroupResponse>> {
    let group = state
        .security_admin_service
        .permission_group(&user, permission_id)
        .await?;

    Ok(Json(PermissionGroupResponse::from(group)))
}

pub async fn create_permission_group_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreatePermissionGroupRequest>,
) -> ApiResult<(StatusCode, Json<PermissionGroupResponse>)> {
    let group = state
        .security_admin_service
        .create_permission_group(
            &user,
            CreatePermissionGroupInput {
                permission_name: payload.permission_name,
                roles: payload.roles,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PermissionGroupResponse::from(group))))
}

pub async fn update_permission_group_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(permission_id): Path<i64>,
    Json(payload): Json<UpdatePermissionGroupRequest>,
) -> ApiResult<Json<PermissionGroupResponse>> {
    let group = state
        .security_admin_service
        .update_permission_group(
            &user,
            permission_id,
            UpdatePermissionGroupInput {
                permission_name: payload.permission_name,
                roles: payload.roles,
            },
        )
        .await?;

    Ok(Json(PermissionGroupResponse::from(group)))
}

pub async fn delete_permission_group_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(permission_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .security_admin_service
        .delete_permission_group(&user, permission_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
