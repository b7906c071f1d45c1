use pandatur_domain::{PermissionGroup, RoleMatrix, UserRoles};

/// Stored role record of a user together with its resolved group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRoleDetails {
    /// Stored record.
    pub record: UserRoles,
    /// Assigned group, when it still exists.
    pub group: Option<PermissionGroup>,
    /// Group matrix overlaid by the user's own entries.
    pub effective: RoleMatrix,
}
