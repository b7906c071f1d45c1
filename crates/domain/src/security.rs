use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by role administration use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a permission group is created.
    PermissionGroupCreated,
    /// Emitted when a permission group name or roles change.
    PermissionGroupUpdated,
    /// Emitted when a permission group is deleted.
    PermissionGroupDeleted,
    /// Emitted when a permission group is assigned to a user.
    PermissionGroupAssigned,
    /// Emitted when a permission group is removed from a user.
    PermissionGroupUnassigned,
    /// Emitted when a user's individual roles are replaced.
    UserRolesUpdated,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PermissionGroupCreated => "security.permission_group.created",
            Self::PermissionGroupUpdated => "security.permission_group.updated",
            Self::PermissionGroupDeleted => "security.permission_group.deleted",
            Self::PermissionGroupAssigned => "security.permission_group.assigned",
            Self::PermissionGroupUnassigned => "security.permission_group.unassigned",
            Self::UserRolesUpdated => "security.user_roles.updated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AuditAction;

    #[test]
    fn audit_actions_share_security_namespace() {
        for action in [
            AuditAction::PermissionGroupCreated,
            AuditAction::PermissionGroupAssigned,
            AuditAction::UserRolesUpdated,
        ] {
            assert!(action.as_str().starts_with("security."));
        }
    }
}
