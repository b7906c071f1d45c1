use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use pandatur_core::{AppError, AppResult, UserId, UserIdentity};
use pandatur_domain::{PermissionGroup, PermissionKey, RoleMatrix, UserRoles};

use crate::security_admin_ports::{
    AuditEvent, AuditRepository, NewPermissionGroup, PermissionGroupRepository, UserRoleRepository,
};

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakePermissionRepository {
    pub(crate) groups: Mutex<BTreeMap<i64, PermissionGroup>>,
    pub(crate) users: Mutex<BTreeMap<UserId, UserRoles>>,
}

impl FakePermissionRepository {
    pub(crate) async fn with_user(self, roles: UserRoles) -> Self {
        self.users.lock().await.insert(roles.user_id, roles);
        self
    }

    pub(crate) async fn with_group(self, group: PermissionGroup) -> Self {
        self.groups
            .lock()
            .await
            .insert(group.permission_id(), group);
        self
    }
}

#[async_trait]
impl PermissionGroupRepository for FakePermissionRepository {
    async fn list_permission_groups(&self) -> AppResult<Vec<PermissionGroup>> {
        Ok(self.groups.lock().await.values().cloned().collect())
    }

    async fn find_permission_group(
        &self,
        permission_id: i64,
    ) -> AppResult<Option<PermissionGroup>> {
        Ok(self.groups.lock().await.get(&permission_id).cloned())
    }

    async fn create_permission_group(
        &self,
        input: NewPermissionGroup,
    ) -> AppResult<PermissionGroup> {
        let mut groups = self.groups.lock().await;
        if groups
            .values()
            .any(|group| group.permission_name() == &input.permission_name)
        {
            return Err(AppError::Conflict(format!(
                "permission group '{}' already exists",
                input.permission_name.as_str()
            )));
        }

        let permission_id = groups.keys().next_back().copied().unwrap_or_default() + 1;
        let group = PermissionGroup::new(permission_id, input.permission_name, input.roles);
        groups.insert(permission_id, group.clone());
        Ok(group)
    }

    async fn update_permission_group(
        &self,
        permission_id: i64,
        input: NewPermissionGroup,
    ) -> AppResult<PermissionGroup> {
        let mut groups = self.groups.lock().await;
        if !groups.contains_key(&permission_id) {
            return Err(AppError::NotFound(format!(
                "permission group '{permission_id}' was not found"
            )));
        }

        let group = PermissionGroup::new(permission_id, input.permission_name, input.roles);
        groups.insert(permission_id, group.clone());
        Ok(group)
    }

    async fn delete_permission_group(&self, permission_id: i64) -> AppResult<()> {
        if self.groups.lock().await.remove(&permission_id).is_none() {
            return Err(AppError::NotFound(format!(
                "permission group '{permission_id}' was not found"
            )));
        }

        for roles in self.users.lock().await.values_mut() {
            if roles.permission_group_id == Some(permission_id) {
                roles.permission_group_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRoleRepository for FakePermissionRepository {
    async fn find_user_roles(&self, user_id: UserId) -> AppResult<Option<UserRoles>> {
        Ok(self.users.lock().await.get(&user_id).cloned())
    }

    async fn save_user_roles(&self, roles: UserRoles) -> AppResult<()> {
        self.users.lock().await.insert(roles.user_id, roles);
        Ok(())
    }
}

pub(crate) fn actor(user_id: i64) -> UserIdentity {
    UserIdentity::new(UserId::new(user_id), format!("user-{user_id}"))
}

pub(crate) fn roles_for(user_id: i64, cells: RoleMatrix) -> UserRoles {
    UserRoles {
        user_id: UserId::new(user_id),
        roles: cells,
        permission_group_id: None,
    }
}

pub(crate) fn administrator_matrix() -> RoleMatrix {
    PermissionKey::all()
        .map(|key| (key, pandatur_domain::Level::Allowed))
        .collect()
}
