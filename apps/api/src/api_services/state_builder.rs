use std::sync::Arc;

use pandatur_application::{
    AuditRepository, AuthorizationService, PermissionGroupRepository, SecurityAdminService,
    UserRoleRepository,
};
use pandatur_infrastructure::{
    InMemoryAuditRepository, InMemoryPermissionRepository, PostgresAuditRepository,
    PostgresPermissionGroupRepository, PostgresUserRoleRepository,
};
use sqlx::PgPool;
use tracing::warn;

use crate::api_config::ApiConfig;
use crate::state::AppState;

#[derive(Clone)]
pub struct RepositorySet {
    pub permission_group_repository: Arc<dyn PermissionGroupRepository>,
    pub user_role_repository: Arc<dyn UserRoleRepository>,
    pub audit_repository: Arc<dyn AuditRepository>,
}

/// Builds Postgres repositories, or in-memory ones when no pool is configured.
pub fn build_repository_set(pool: Option<PgPool>) -> RepositorySet {
    match pool {
        Some(pool) => RepositorySet {
            permission_group_repository: Arc::new(PostgresPermissionGroupRepository::new(
                pool.clone(),
            )),
            user_role_repository: Arc::new(PostgresUserRoleRepository::new(pool.clone())),
            audit_repository: Arc::new(PostgresAuditRepository::new(pool)),
        },
        None => {
            warn!("DATABASE_URL is not set; role data is kept in memory and lost on restart");

            let repository = Arc::new(InMemoryPermissionRepository::new());
            RepositorySet {
                permission_group_repository: repository.clone(),
                user_role_repository: repository,
                audit_repository: Arc::new(InMemoryAuditRepository::new()),
            }
        }
    }
}

pub fn build_app_state(repositories: &RepositorySet, config: &ApiConfig) -> AppState {
    let authorization_service = AuthorizationService::new(
        repositories.user_role_repository.clone(),
        repositories.permission_group_repository.clone(),
    );
    let security_admin_service = SecurityAdminService::new(
        authorization_service.clone(),
        repositories.permission_group_repository.clone(),
        repositories.user_role_repository.clone(),
        repositories.audit_repository.clone(),
    );

    AppState {
        security_admin_service,
        authorization_service,
        locale: config.app_language,
    }
}
