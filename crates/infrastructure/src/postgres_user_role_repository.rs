use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use pandatur_application::UserRoleRepository;
use pandatur_core::{AppError, AppResult, UserId};
use pandatur_domain::UserRoles;

use crate::role_columns::{roles_from_column, roles_to_column};

/// PostgreSQL-backed repository for per-user role records.
#[derive(Clone)]
pub struct PostgresUserRoleRepository {
    pool: PgPool,
}

impl PostgresUserRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRolesRow {
    user_id: i64,
    roles: Vec<String>,
    permission_group_id: Option<i64>,
}

impl From<UserRolesRow> for UserRoles {
    fn from(row: UserRolesRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            roles: roles_from_column(row.roles, "user_roles"),
            permission_group_id: row.permission_group_id,
        }
    }
}

#[async_trait]
impl UserRoleRepository for PostgresUserRoleRepository {
    async fn find_user_roles(&self, user_id: UserId) -> AppResult<Option<UserRoles>> {
        let row = sqlx::query_as::<_, UserRolesRow>(
            r#"
            SELECT user_id, roles, permission_group_id
            FROM user_roles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load roles of user '{user_id}': {error}"))
        })?;

        Ok(row.map(UserRoles::from))
    }

    async fn save_user_roles(&self, roles: UserRoles) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, roles, permission_group_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET roles = EXCLUDED.roles,
                permission_group_id = EXCLUDED.permission_group_id,
                updated_at = now()
            "#,
        )
        .bind(roles.user_id.as_i64())
        .bind(roles_to_column(&roles.roles))
        .bind(roles.permission_group_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23503")
                {
                    return Err(AppError::NotFound(format!(
                        "permission group '{}' was not found",
                        roles.permission_group_id.unwrap_or_default()
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to save roles of user '{}': {error}",
                    roles.user_id
                )))
            }
        }
    }
}
