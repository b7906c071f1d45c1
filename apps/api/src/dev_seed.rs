use pandatur_application::UserRoleRepository;
use pandatur_core::{AppResult, UserId};
use pandatur_domain::{Action, Category, Level, PermissionKey, RoleMatrix, UserRoles};
use tracing::info;

/// Grants every permission to the configured administrator.
///
/// Role administration itself requires `USERS/EDIT`, so the first
/// administrator has to be written straight to the repository.
pub async fn bootstrap_admin(repository: &dyn UserRoleRepository, user_id: UserId) -> AppResult<()> {
    let existing = repository.find_user_roles(user_id).await?;
    if existing.as_ref().is_some_and(|record| {
        record.permission_group_id.is_none()
            && record.roles.level_for(Category::Users, Action::Edit) == Level::Allowed
    }) {
        info!(%user_id, "bootstrap administrator already has role management access");
        return Ok(());
    }

    repository
        .save_user_roles(UserRoles {
            user_id,
            roles: administrator_roles(),
            permission_group_id: None,
        })
        .await?;

    info!(%user_id, "granted full role matrix to bootstrap administrator");
    Ok(())
}

fn administrator_roles() -> RoleMatrix {
    PermissionKey::all()
        .map(|key| (key, Level::Allowed))
        .collect()
}
