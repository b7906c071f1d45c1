use pandatur_core::{AppError, UserId};
use pandatur_domain::{
    RoleEditor, RoleMatrix, RoleSaveRequest, RoleToken, RolesPayload, UserRoles, decode,
};
use tracing::info;

use crate::role_ingestion::parse_role_input;
use crate::security_admin_ports::UserRoleDetails;

use super::*;

impl SecurityAdminService {
    /// Returns the role record of a user with its effective matrix.
    ///
    /// Users holding `IfResponsible` on `USERS/VIEW` may read their own record.
    pub async fn user_roles(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
    ) -> AppResult<UserRoleDetails> {
        self.require_role_read_access(actor, &AccessContext::for_responsible(user_id))
            .await?;

        let record = self.authorization_service.user_roles(user_id).await?;
        let group = self.authorization_service.assigned_group(&record).await?;
        let effective = record.effective_roles(group.as_ref());

        Ok(UserRoleDetails {
            record,
            group,
            effective,
        })
    }

    /// Returns the effective matrix of a user.
    pub async fn effective_roles(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
    ) -> AppResult<RoleMatrix> {
        Ok(self.user_roles(actor, user_id).await?.effective)
    }

    /// Returns a matrix editor initialized from a user's record.
    pub async fn role_editor(&self, actor: &UserIdentity, user_id: UserId) -> AppResult<RoleEditor> {
        let details = self.user_roles(actor, user_id).await?;
        Ok(RoleEditor::for_user(&details.record, details.group.as_ref()))
    }

    /// Assigns a group to a user, discarding the user's individual entries.
    pub async fn assign_permission_group(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        permission_id: i64,
    ) -> AppResult<UserRoles> {
        self.require_role_manage_permission(actor).await?;

        let group = self
            .permission_group_repository
            .find_permission_group(permission_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("permission group '{permission_id}' was not found"))
            })?;

        let record = UserRoles {
            user_id,
            roles: RoleMatrix::new(),
            permission_group_id: Some(permission_id),
        };
        self.user_role_repository
            .save_user_roles(record.clone())
            .await?;

        self.append_audit_event(
            actor,
            AuditAction::PermissionGroupAssigned,
            "user_permission_group",
            format!("{user_id}:{permission_id}"),
            format!(
                "assigned permission group '{}' to user '{user_id}'",
                group.permission_name().as_str()
            ),
        )
        .await?;

        Ok(record)
    }

    /// Removes the group from a user, keeping the user's individual entries.
    pub async fn remove_permission_group(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
    ) -> AppResult<UserRoles> {
        self.require_role_manage_permission(actor).await?;

        let mut record = self.authorization_service.user_roles(user_id).await?;
        let permission_id = record.permission_group_id.take().ok_or_else(|| {
            AppError::NotFound(format!("user '{user_id}' has no permission group"))
        })?;
        self.user_role_repository
            .save_user_roles(record.clone())
            .await?;

        self.append_audit_event(
            actor,
            AuditAction::PermissionGroupUnassigned,
            "user_permission_group",
            format!("{user_id}:{permission_id}"),
            format!("removed permission group '{permission_id}' from user '{user_id}'"),
        )
        .await?;

        Ok(record)
    }

    /// Replaces a user's individual entries and detaches any group.
    pub async fn update_user_roles(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        roles: RolesPayload,
    ) -> AppResult<UserRoles> {
        self.require_role_manage_permission(actor).await?;

        let record = UserRoles {
            user_id,
            roles: parse_role_input(roles, "update_user_roles")?,
            permission_group_id: None,
        };
        self.store_individual_roles(actor, record).await
    }

    /// Persists the state of a matrix editor for a user.
    pub async fn save_role_editor(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        editor: &RoleEditor,
    ) -> AppResult<UserRoles> {
        match editor.save_request() {
            RoleSaveRequest::AssignGroup { permission_id } => {
                self.assign_permission_group(actor, user_id, permission_id)
                    .await
            }
            RoleSaveRequest::StoreIndividual { roles } => {
                self.require_role_manage_permission(actor).await?;
                let record = UserRoles {
                    user_id,
                    roles: decode(roles.iter().map(RoleToken::as_str)),
                    permission_group_id: None,
                };
                self.store_individual_roles(actor, record).await
            }
        }
    }

    async fn store_individual_roles(
        &self,
        actor: &UserIdentity,
        record: UserRoles,
    ) -> AppResult<UserRoles> {
        self.user_role_repository
            .save_user_roles(record.clone())
            .await?;

        info!(
            user_id = %record.user_id,
            entries = record.roles.len(),
            "stored individual roles"
        );

        self.append_audit_event(
            actor,
            AuditAction::UserRolesUpdated,
            "user_roles",
            record.user_id.to_string(),
            format!(
                "replaced individual roles of user '{}' with {} entries",
                record.user_id,
                record.roles.len()
            ),
        )
        .await?;

        Ok(record)
    }
}
