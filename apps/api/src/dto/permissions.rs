use pandatur_domain::{Action, Category, Level, Locale, ResponsibleId, RolesPayload};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

mod conversions;

/// One selectable level with its display attributes.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/level-response.ts"
)]
pub struct LevelResponse {
    pub code: String,
    pub label: String,
    pub color: String,
}

/// Closed permission vocabulary in display order.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-vocabulary-response.ts"
)]
pub struct PermissionVocabularyResponse {
    pub categories: Vec<String>,
    pub actions: Vec<String>,
    pub levels: Vec<LevelResponse>,
}

impl PermissionVocabularyResponse {
    pub fn build(locale: Locale) -> Self {
        Self {
            categories: Category::all()
                .iter()
                .map(|category| category.as_str().to_owned())
                .collect(),
            actions: Action::all()
                .iter()
                .map(|action| action.as_str().to_owned())
                .collect(),
            levels: Level::all()
                .iter()
                .map(|level| LevelResponse {
                    code: level.code().to_owned(),
                    label: level.label(locale).to_owned(),
                    color: level.color().to_owned(),
                })
                .collect(),
        }
    }
}

/// Incoming payload for a contextual permission check.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/check-permission-request.ts"
)]
pub struct CheckPermissionRequest {
    pub category: String,
    pub action: String,
    #[serde(default)]
    #[ts(type = "number | string | null")]
    pub responsible_id: Option<ResponsibleId>,
    #[serde(default)]
    pub skip_context_check: bool,
}

/// Outcome of a contextual permission check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/check-permission-response.ts"
)]
pub struct CheckPermissionResponse {
    pub allowed: bool,
    pub decision: String,
}

/// Effective permissions of the calling user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/my-permissions-response.ts"
)]
pub struct MyPermissionsResponse {
    pub user_id: i64,
    pub roles: Vec<String>,
}

/// API representation of a permission group.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-group-response.ts"
)]
pub struct PermissionGroupResponse {
    pub permission_id: i64,
    pub permission_name: String,
    pub roles: Vec<String>,
}

/// Incoming payload for permission group creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-permission-group-request.ts"
)]
pub struct CreatePermissionGroupRequest {
    pub permission_name: String,
    #[serde(default)]
    #[ts(type = "Array<string> | string | null")]
    pub roles: RolesPayload,
}

/// Incoming payload for permission group updates. Omitted fields are kept.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-permission-group-request.ts"
)]
pub struct UpdatePermissionGroupRequest {
    #[serde(default)]
    pub permission_name: Option<String>,
    #[serde(default)]
    #[ts(type = "Array<string> | string | null")]
    pub roles: Option<RolesPayload>,
}

/// API representation of a user's role record.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-roles-response.ts"
)]
pub struct UserRolesResponse {
    pub user_id: i64,
    pub roles: Vec<String>,
    pub permission_group_id: Option<i64>,
    pub permission_group_name: Option<String>,
    pub effective_roles: Vec<String>,
}

/// Incoming payload replacing a user's individual roles.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-user-roles-request.ts"
)]
pub struct UpdateUserRolesRequest {
    #[serde(default)]
    #[ts(type = "Array<string> | string | null")]
    pub roles: RolesPayload,
}

/// Incoming payload assigning a permission group to a user.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-permission-group-request.ts"
)]
pub struct AssignPermissionGroupRequest {
    pub permission_id: i64,
}
