use std::collections::BTreeMap;

use async_trait::async_trait;
use pandatur_application::{NewPermissionGroup, PermissionGroupRepository, UserRoleRepository};
use pandatur_core::{AppError, AppResult, UserId};
use pandatur_domain::{PermissionGroup, UserRoles};
use tokio::sync::RwLock;

/// In-memory repository for permission groups and user role records.
#[derive(Debug, Default)]
pub struct InMemoryPermissionRepository {
    groups: RwLock<GroupTable>,
    users: RwLock<BTreeMap<UserId, UserRoles>>,
}

#[derive(Debug, Default)]
struct GroupTable {
    last_id: i64,
    rows: BTreeMap<i64, PermissionGroup>,
}

impl GroupTable {
    fn ensure_unique_name(&self, input: &NewPermissionGroup, except: Option<i64>) -> AppResult<()> {
        let taken = self.rows.values().any(|group| {
            Some(group.permission_id()) != except
                && group.permission_name() == &input.permission_name
        });

        if taken {
            return Err(AppError::Conflict(format!(
                "permission group '{}' already exists",
                input.permission_name.as_str()
            )));
        }

        Ok(())
    }
}

impl InMemoryPermissionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PermissionGroupRepository for InMemoryPermissionRepository {
    async fn list_permission_groups(&self) -> AppResult<Vec<PermissionGroup>> {
        let groups = self.groups.read().await;

        let mut values = groups.rows.values().cloned().collect::<Vec<_>>();
        values.sort_by(|left, right| {
            left.permission_name()
                .as_str()
                .cmp(right.permission_name().as_str())
        });

        Ok(values)
    }

    async fn find_permission_group(
        &self,
        permission_id: i64,
    ) -> AppResult<Option<PermissionGroup>> {
        Ok(self.groups.read().await.rows.get(&permission_id).cloned())
    }

    async fn create_permission_group(
        &self,
        input: NewPermissionGroup,
    ) -> AppResult<PermissionGroup> {
        let mut groups = self.groups.write().await;
        groups.ensure_unique_name(&input, None)?;

        groups.last_id += 1;
        let group = PermissionGroup::new(groups.last_id, input.permission_name, input.roles);
        groups.rows.insert(group.permission_id(), group.clone());

        Ok(group)
    }

    async fn update_permission_group(
        &self,
        permission_id: i64,
        input: NewPermissionGroup,
    ) -> AppResult<PermissionGroup> {
        let mut groups = self.groups.write().await;
        if !groups.rows.contains_key(&permission_id) {
            return Err(AppError::NotFound(format!(
                "permission group '{permission_id}' was not found"
            )));
        }
        groups.ensure_unique_name(&input, Some(permission_id))?;

        let group = PermissionGroup::new(permission_id, input.permission_name, input.roles);
        groups.rows.insert(permission_id, group.clone());

        Ok(group)
    }

    async fn delete_permission_group(&self, permission_id: i64) -> AppResult<()> {
        let mut groups = self.groups.write().await;
        if groups.rows.remove(&permission_id).is_none() {
            return Err(AppError::NotFound(format!(
                "permission group '{permission_id}' was not found"
            )));
        }

        let mut users = self.users.write().await;
        for record in users.values_mut() {
            if record.permission_group_id == Some(permission_id) {
                record.permission_group_id = None;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl UserRoleRepository for InMemoryPermissionRepository {
    async fn find_user_roles(&self, user_id: UserId) -> AppResult<Option<UserRoles>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn save_user_roles(&self, roles: UserRoles) -> AppResult<()> {
        // Hold the group lock so a concurrent delete cannot leave a dangling id.
        let groups = self.groups.read().await;
        if let Some(permission_id) = roles.permission_group_id
            && !groups.rows.contains_key(&permission_id)
        {
            return Err(AppError::NotFound(format!(
                "permission group '{permission_id}' was not found"
            )));
        }

        self.users.write().await.insert(roles.user_id, roles);
        Ok(())
    }
}
