use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use pandatur_application::{NewPermissionGroup, PermissionGroupRepository};
use pandatur_core::{AppError, AppResult, NonEmptyString};
use pandatur_domain::PermissionGroup;

use crate::role_columns::{roles_from_column, roles_to_column};

/// PostgreSQL-backed repository for permission groups.
#[derive(Clone)]
pub struct PostgresPermissionGroupRepository {
    pool: PgPool,
}

impl PostgresPermissionGroupRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionGroupRow {
    id: i64,
    permission_name: String,
    roles: Vec<String>,
}

impl PermissionGroupRow {
    fn into_group(self) -> AppResult<PermissionGroup> {
        let permission_name = NonEmptyString::new(self.permission_name).map_err(|error| {
            AppError::Internal(format!(
                "stored permission group '{}' has an invalid name: {error}",
                self.id
            ))
        })?;
        let roles = roles_from_column(self.roles, "permission_groups");

        Ok(PermissionGroup::new(self.id, permission_name, roles))
    }
}

#[async_trait]
impl PermissionGroupRepository for PostgresPermissionGroupRepository {
    async fn list_permission_groups(&self) -> AppResult<Vec<PermissionGroup>> {
        let rows = sqlx::query_as::<_, PermissionGroupRow>(
            r#"
            SELECT id, permission_name, roles
            FROM permission_groups
            ORDER BY permission_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list permission groups: {error}"))
        })?;

        rows.into_iter().map(PermissionGroupRow::into_group).collect()
    }

    async fn find_permission_group(
        &self,
        permission_id: i64,
    ) -> AppResult<Option<PermissionGroup>> {
        let row = sqlx::query_as::<_, PermissionGroupRow>(
            r#"
            SELECT id, permission_name, roles
            FROM permission_groups
            WHERE id = $1
            "#,
        )
        .bind(permission_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to find permission group '{permission_id}': {error}"
            ))
        })?;

        row.map(PermissionGroupRow::into_group).transpose()
    }

    async fn create_permission_group(
        &self,
        input: NewPermissionGroup,
    ) -> AppResult<PermissionGroup> {
        let row = sqlx::query_as::<_, PermissionGroupRow>(
            r#"
            INSERT INTO permission_groups (permission_name, roles)
            VALUES ($1, $2)
            RETURNING id, permission_name, roles
            "#,
        )
        .bind(input.permission_name.as_str())
        .bind(roles_to_column(&input.roles))
        .fetch_one(&self.pool)
        .await
        .map_err(|error| map_group_write_error(error, &input, "create"))?;

        row.into_group()
    }

    async fn update_permission_group(
        &self,
        permission_id: i64,
        input: NewPermissionGroup,
    ) -> AppResult<PermissionGroup> {
        let row = sqlx::query_as::<_, PermissionGroupRow>(
            r#"
            UPDATE permission_groups
            SET permission_name = $2,
                roles = $3,
                updated_at = now()
            WHERE id = $1
            RETURNING id, permission_name, roles
            "#,
        )
        .bind(permission_id)
        .bind(input.permission_name.as_str())
        .bind(roles_to_column(&input.roles))
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| map_group_write_error(error, &input, "update"))?
        .ok_or_else(|| {
            AppError::NotFound(format!("permission group '{permission_id}' was not found"))
        })?;

        row.into_group()
    }

    async fn delete_permission_group(&self, permission_id: i64) -> AppResult<()> {
        // user_roles.permission_group_id is ON DELETE SET NULL.
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM permission_groups
            WHERE id = $1
            "#,
        )
        .bind(permission_id)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to delete permission group '{permission_id}': {error}"
            ))
        })?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!(
                "permission group '{permission_id}' was not found"
            )));
        }

        Ok(())
    }
}

fn map_group_write_error(error: sqlx::Error, input: &NewPermissionGroup, verb: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!(
            "permission group '{}' already exists",
            input.permission_name.as_str()
        ));
    }

    AppError::Internal(format!("failed to {verb} permission group: {error}"))
}

#[cfg(test)]
mod tests;
