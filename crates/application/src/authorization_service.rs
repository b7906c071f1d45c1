use std::sync::Arc;

use pandatur_core::{AppResult, UserId, UserIdentity};
use pandatur_domain::{PermissionGroup, RoleMatrix, UserRoles};

use crate::security_admin_ports::{PermissionGroupRepository, UserRoleRepository};

mod permissions;

/// Application service for role-matrix authorization checks.
#[derive(Clone)]
pub struct AuthorizationService {
    user_role_repository: Arc<dyn UserRoleRepository>,
    permission_group_repository: Arc<dyn PermissionGroupRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from repository implementations.
    #[must_use]
    pub fn new(
        user_role_repository: Arc<dyn UserRoleRepository>,
        permission_group_repository: Arc<dyn PermissionGroupRepository>,
    ) -> Self {
        Self {
            user_role_repository,
            permission_group_repository,
        }
    }

    /// Returns the stored role record of a user, or an empty one.
    pub async fn user_roles(&self, user_id: UserId) -> AppResult<UserRoles> {
        Ok(self
            .user_role_repository
            .find_user_roles(user_id)
            .await?
            .unwrap_or_else(|| UserRoles::empty(user_id)))
    }

    /// Returns the group assigned to a user record, if it still exists.
    pub async fn assigned_group(&self, roles: &UserRoles) -> AppResult<Option<PermissionGroup>> {
        match roles.permission_group_id {
            Some(permission_id) => {
                self.permission_group_repository
                    .find_permission_group(permission_id)
                    .await
            }
            None => Ok(None),
        }
    }

    /// Returns the effective matrix of a user: assigned group overlaid by the
    /// user's own entries.
    pub async fn effective_matrix(&self, user_id: UserId) -> AppResult<RoleMatrix> {
        let roles = self.user_roles(user_id).await?;
        let group = self.assigned_group(&roles).await?;
        Ok(roles.effective_roles(group.as_ref()))
    }

    /// Returns the effective matrix of the acting user.
    pub async fn actor_matrix(&self, actor: &UserIdentity) -> AppResult<RoleMatrix> {
        self.effective_matrix(actor.user_id()).await
    }
}

#[cfg(test)]
mod tests;
