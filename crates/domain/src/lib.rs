//! Role/permission matrix: vocabulary, token codec, evaluator and editor state.

#![forbid(unsafe_code)]

mod evaluator;
mod matrix;
mod permission_group;
mod role_editor;
mod role_token;
mod security;
mod vocabulary;

pub use evaluator::{
    AccessContext, AccessDecision, ResponsibleId, can, has_strict_permission, resolve_access,
};
pub use matrix::{PermissionKey, RoleMatrix};
pub use permission_group::{PermissionGroup, UserRoles};
pub use role_editor::{CellChange, RoleEditor, RoleSaveRequest, TokenDiff};
pub use role_token::{
    DecodeReport, RejectedToken, RoleToken, RolesPayload, TokenRejection, decode, decode_json,
    decode_with_report, encode,
};
pub use security::AuditAction;
pub use vocabulary::{Action, Category, Level, Locale};
