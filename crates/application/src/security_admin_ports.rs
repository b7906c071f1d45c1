mod audit;
mod permission_groups;
mod repositories;
mod user_roles;

pub use audit::{AuditEvent, AuditRepository};
pub use permission_groups::{
    CreatePermissionGroupInput, NewPermissionGroup, UpdatePermissionGroupInput,
};
pub use repositories::{PermissionGroupRepository, UserRoleRepository};
pub use user_roles::UserRoleDetails;
