use pandatur_core::NonEmptyString;
use pandatur_domain::{RoleMatrix, RolesPayload};

/// Input payload for creating permission groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePermissionGroupInput {
    /// Unique group name.
    pub permission_name: String,
    /// Group roles as received from the client.
    pub roles: RolesPayload,
}

/// Input payload for updating permission groups. `None` keeps the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePermissionGroupInput {
    /// New group name.
    pub permission_name: Option<String>,
    /// New group roles.
    pub roles: Option<RolesPayload>,
}

/// Validated group data handed to repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPermissionGroup {
    /// Unique group name.
    pub permission_name: NonEmptyString,
    /// Normalized group matrix.
    pub roles: RoleMatrix,
}
