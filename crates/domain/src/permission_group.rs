use pandatur_core::{NonEmptyString, UserId};

use crate::matrix::RoleMatrix;
use crate::role_token::{RoleToken, encode};

/// Named, reusable bundle of role grants assignable to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGroup {
    permission_id: i64,
    permission_name: NonEmptyString,
    roles: RoleMatrix,
}

impl PermissionGroup {
    /// Creates a permission group.
    #[must_use]
    pub fn new(permission_id: i64, permission_name: NonEmptyString, roles: RoleMatrix) -> Self {
        Self {
            permission_id,
            permission_name,
            roles,
        }
    }

    /// Returns the server-issued group id.
    #[must_use]
    pub fn permission_id(&self) -> i64 {
        self.permission_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn permission_name(&self) -> &NonEmptyString {
        &self.permission_name
    }

    /// Returns the group matrix.
    #[must_use]
    pub fn roles(&self) -> &RoleMatrix {
        &self.roles
    }

    /// Returns the persisted token form of the group matrix.
    #[must_use]
    pub fn tokens(&self) -> Vec<RoleToken> {
        encode(&self.roles)
    }
}

/// Role data stored for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRoles {
    /// User the record belongs to.
    pub user_id: UserId,
    /// Individual overrides.
    pub roles: RoleMatrix,
    /// Assigned permission group, if any.
    pub permission_group_id: Option<i64>,
}

impl UserRoles {
    /// Record for a user with no grants and no group.
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            roles: RoleMatrix::new(),
            permission_group_id: None,
        }
    }

    /// Returns the effective matrix: the group matrix overlaid by the user's
    /// own entries.
    ///
    /// `group` is ignored unless it is the group assigned to this user.
    #[must_use]
    pub fn effective_roles(&self, group: Option<&PermissionGroup>) -> RoleMatrix {
        match group {
            Some(group) if self.permission_group_id == Some(group.permission_id()) => {
                group.roles().overlay(&self.roles)
            }
            _ => self.roles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pandatur_core::{AppResult, NonEmptyString, UserId};

    use crate::matrix::{PermissionKey, RoleMatrix};
    use crate::vocabulary::{Action, Category, Level};

    use super::{PermissionGroup, UserRoles};

    fn users_view(level: Level) -> RoleMatrix {
        RoleMatrix::from_iter([(PermissionKey::new(Category::Users, Action::View), level)])
    }

    #[test]
    fn individual_override_beats_group_grant() -> AppResult<()> {
        let group = PermissionGroup::new(
            3,
            NonEmptyString::new("Managers")?,
            users_view(Level::Team),
        );
        let record = UserRoles {
            user_id: UserId::new(8),
            roles: users_view(Level::Denied),
            permission_group_id: Some(3),
        };

        assert_eq!(
            record
                .effective_roles(Some(&group))
                .level_for(Category::Users, Action::View),
            Level::Denied
        );
        Ok(())
    }

    #[test]
    fn unrelated_group_is_ignored() -> AppResult<()> {
        let group = PermissionGroup::new(
            4,
            NonEmptyString::new("Operators")?,
            users_view(Level::Allowed),
        );
        let record = UserRoles {
            user_id: UserId::new(8),
            roles: RoleMatrix::new(),
            permission_group_id: Some(3),
        };

        assert!(record.effective_roles(Some(&group)).is_empty());
        Ok(())
    }
}
