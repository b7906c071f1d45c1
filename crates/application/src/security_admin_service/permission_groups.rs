use pandatur_core::{AppError, NonEmptyString};
use pandatur_domain::PermissionGroup;

use crate::role_ingestion::parse_role_input;
use crate::security_admin_ports::{
    CreatePermissionGroupInput, NewPermissionGroup, UpdatePermissionGroupInput,
};

use super::*;

impl SecurityAdminService {
    /// Lists permission groups for users allowed to view user roles.
    pub async fn list_permission_groups(
        &self,
        actor: &UserIdentity,
    ) -> AppResult<Vec<PermissionGroup>> {
        self.require_role_read_access(actor, &AccessContext::skip_context_check())
            .await?;
        self.permission_group_repository
            .list_permission_groups()
            .await
    }

    /// Returns one permission group.
    pub async fn permission_group(
        &self,
        actor: &UserIdentity,
        permission_id: i64,
    ) -> AppResult<PermissionGroup> {
        self.require_role_read_access(actor, &AccessContext::skip_context_check())
            .await?;
        self.find_permission_group(permission_id).await
    }

    /// Creates a permission group and emits an audit event.
    pub async fn create_permission_group(
        &self,
        actor: &UserIdentity,
        input: CreatePermissionGroupInput,
    ) -> AppResult<PermissionGroup> {
        self.require_role_manage_permission(actor).await?;

        let permission_name = NonEmptyString::new(input.permission_name).map_err(|_| {
            AppError::Validation("permission group name is required".to_owned())
        })?;
        let roles = parse_role_input(input.roles, "create_permission_group")?;

        let group = self
            .permission_group_repository
            .create_permission_group(NewPermissionGroup {
                permission_name,
                roles,
            })
            .await?;

        self.append_audit_event(
            actor,
            AuditAction::PermissionGroupCreated,
            "permission_group",
            group.permission_id().to_string(),
            format!(
                "created permission group '{}' with {} roles",
                group.permission_name().as_str(),
                group.tokens().len()
            ),
        )
        .await?;

        Ok(group)
    }

    /// Updates a permission group and emits an audit event.
    pub async fn update_permission_group(
        &self,
        actor: &UserIdentity,
        permission_id: i64,
        input: UpdatePermissionGroupInput,
    ) -> AppResult<PermissionGroup> {
        self.require_role_manage_permission(actor).await?;

        let current = self.find_permission_group(permission_id).await?;
        let permission_name = match input.permission_name {
            Some(name) => NonEmptyString::new(name).map_err(|_| {
                AppError::Validation("permission group name is required".to_owned())
            })?,
            None => current.permission_name().clone(),
        };
        let roles = match input.roles {
            Some(payload) => parse_role_input(payload, "update_permission_group")?,
            None => current.roles().clone(),
        };

        let group = self
            .permission_group_repository
            .update_permission_group(
                permission_id,
                NewPermissionGroup {
                    permission_name,
                    roles,
                },
            )
            .await?;

        self.append_audit_event(
            actor,
            AuditAction::PermissionGroupUpdated,
            "permission_group",
            permission_id.to_string(),
            format!(
                "updated permission group '{}' with {} roles",
                group.permission_name().as_str(),
                group.tokens().len()
            ),
        )
        .await?;

        Ok(group)
    }

    /// Deletes a permission group and emits an audit event.
    pub async fn delete_permission_group(
        &self,
        actor: &UserIdentity,
        permission_id: i64,
    ) -> AppResult<()> {
        self.require_role_manage_permission(actor).await?;

        let group = self.find_permission_group(permission_id).await?;
        self.permission_group_repository
            .delete_permission_group(permission_id)
            .await?;

        self.append_audit_event(
            actor,
            AuditAction::PermissionGroupDeleted,
            "permission_group",
            permission_id.to_string(),
            format!(
                "deleted permission group '{}'",
                group.permission_name().as_str()
            ),
        )
        .await
    }

    async fn find_permission_group(&self, permission_id: i64) -> AppResult<PermissionGroup> {
        self.permission_group_repository
            .find_permission_group(permission_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("permission group '{permission_id}' was not found"))
            })
    }
}
