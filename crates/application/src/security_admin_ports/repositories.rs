use async_trait::async_trait;

use pandatur_core::{AppResult, UserId};
use pandatur_domain::{PermissionGroup, UserRoles};

use super::permission_groups::NewPermissionGroup;

/// Repository port for permission group administration.
#[async_trait]
pub trait PermissionGroupRepository: Send + Sync {
    /// Lists all permission groups ordered by name.
    async fn list_permission_groups(&self) -> AppResult<Vec<PermissionGroup>>;

    /// Finds one permission group.
    async fn find_permission_group(&self, permission_id: i64)
    -> AppResult<Option<PermissionGroup>>;

    /// Creates a permission group. Duplicate names are a conflict.
    async fn create_permission_group(&self, input: NewPermissionGroup)
    -> AppResult<PermissionGroup>;

    /// Replaces the name and roles of an existing group.
    async fn update_permission_group(
        &self,
        permission_id: i64,
        input: NewPermissionGroup,
    ) -> AppResult<PermissionGroup>;

    /// Deletes a group and detaches it from every user that had it.
    async fn delete_permission_group(&self, permission_id: i64) -> AppResult<()>;
}

/// Repository port for per-user role records.
#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    /// Finds the role record of a user.
    async fn find_user_roles(&self, user_id: UserId) -> AppResult<Option<UserRoles>>;

    /// Inserts or replaces the role record of a user.
    async fn save_user_roles(&self, roles: UserRoles) -> AppResult<()>;
}
