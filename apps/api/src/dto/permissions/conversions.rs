use pandatur_application::UserRoleDetails;
use pandatur_domain::{PermissionGroup, RoleMatrix, encode};

use super::{PermissionGroupResponse, UserRolesResponse};

fn token_strings(roles: &RoleMatrix) -> Vec<String> {
    encode(roles).into_iter().map(String::from).collect()
}

impl From<PermissionGroup> for PermissionGroupResponse {
    fn from(value: PermissionGroup) -> Self {
        Self {
            permission_id: value.permission_id(),
            permission_name: value.permission_name().as_str().to_owned(),
            roles: token_strings(value.roles()),
        }
    }
}

impl From<UserRoleDetails> for UserRolesResponse {
    fn from(value: UserRoleDetails) -> Self {
        Self {
            user_id: value.record.user_id.as_i64(),
            roles: token_strings(&value.record.roles),
            permission_group_id: value.record.permission_group_id,
            permission_group_name: value
                .group
                .map(|group| group.permission_name().as_str().to_owned()),
            effective_roles: token_strings(&value.effective),
        }
    }
}
