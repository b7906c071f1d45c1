use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;

use pandatur_core::{UserId, UserIdentity};

use crate::dto::{
    AssignPermissionGroupRequest, CheckPermissionRequest, CheckPermissionResponse,
    CreatePermissionGroupRequest, MyPermissionsResponse, PermissionGroupResponse,
    PermissionVocabularyResponse, UpdatePermissionGroupRequest, UpdateUserRolesRequest,
    UserRolesResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod permission_groups;
mod permissions;
mod user_roles;

pub use permission_groups::{
    create_permission_group_handler, delete_permission_group_handler,
    list_permission_groups_handler, permission_group_handler, update_permission_group_handler,
};
pub use permissions::{
    check_permission_handler, my_permissions_handler, permission_vocabulary_handler,
};
pub use user_roles::{
    assign_permission_group_handler, remove_permission_group_handler, update_user_roles_handler,
    user_roles_handler,
};
