//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_audit_repository;
mod in_memory_permission_repository;
mod postgres_audit_repository;
mod postgres_permission_group_repository;
mod postgres_user_role_repository;
mod role_columns;

pub use in_memory_audit_repository::{InMemoryAuditRepository, RecordedAuditEvent};
pub use in_memory_permission_repository::InMemoryPermissionRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_permission_group_repository::PostgresPermissionGroupRepository;
pub use postgres_user_role_repository::PostgresUserRoleRepository;
