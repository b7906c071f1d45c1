use std::sync::Arc;

use pandatur_core::{AppResult, UserIdentity};
use pandatur_domain::{AccessContext, Action, AuditAction, Category};

use crate::AuthorizationService;
use crate::security_admin_ports::{
    AuditEvent, AuditRepository, PermissionGroupRepository, UserRoleRepository,
};

mod permission_groups;
mod user_roles;

/// Application service for permission group and user role administration.
#[derive(Clone)]
pub struct SecurityAdminService {
    authorization_service: AuthorizationService,
    permission_group_repository: Arc<dyn PermissionGroupRepository>,
    user_role_repository: Arc<dyn UserRoleRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl SecurityAdminService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        permission_group_repository: Arc<dyn PermissionGroupRepository>,
        user_role_repository: Arc<dyn UserRoleRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            permission_group_repository,
            user_role_repository,
            audit_repository,
        }
    }

    async fn require_role_manage_permission(&self, actor: &UserIdentity) -> AppResult<()> {
        self.authorization_service
            .require_permission(actor, Category::Users, Action::Edit)
            .await
    }

    async fn require_role_read_access(
        &self,
        actor: &UserIdentity,
        context: &AccessContext,
    ) -> AppResult<()> {
        self.authorization_service
            .require_access(actor, Category::Users, Action::View, context)
            .await
    }

    async fn append_audit_event(
        &self,
        actor: &UserIdentity,
        action: AuditAction,
        resource_type: &str,
        resource_id: String,
        detail: String,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                subject: actor.user_id().to_string(),
                action,
                resource_type: resource_type.to_owned(),
                resource_id,
                detail: Some(detail),
            })
            .await
    }
}
