//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
pub mod notifications;
mod role_ingestion;
mod security_admin_ports;
mod security_admin_service;

#[cfg(test)]
mod test_support;

pub use authorization_service::AuthorizationService;
pub use notifications::{Notification, NotificationKind};
pub use role_ingestion::ingest_roles;
pub use security_admin_ports::{
    AuditEvent, AuditRepository, CreatePermissionGroupInput, NewPermissionGroup,
    PermissionGroupRepository, UpdatePermissionGroupInput, UserRoleDetails, UserRoleRepository,
};
pub use security_admin_service::SecurityAdminService;
