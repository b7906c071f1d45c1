mod common;
mod permissions;

pub use common::{HealthResponse, NotificationResponse};
pub use permissions::{
    AssignPermissionGroupRequest, CheckPermissionRequest, CheckPermissionResponse,
    CreatePermissionGroupRequest, MyPermissionsResponse, PermissionGroupResponse,
    PermissionVocabularyResponse, UpdatePermissionGroupRequest, UpdateUserRolesRequest,
    UserRolesResponse,
};
