use std::sync::Arc;

use pandatur_core::{AppError, AppResult, NonEmptyString, UserId};
use pandatur_domain::{
    AccessContext, AccessDecision, Action, Category, Level, PermissionGroup, PermissionKey,
    RoleMatrix, UserRoles,
};

use crate::test_support::{FakePermissionRepository, actor, roles_for};

use super::AuthorizationService;

fn cell(category: Category, action: Action, level: Level) -> RoleMatrix {
    RoleMatrix::from_iter([(PermissionKey::new(category, action), level)])
}

fn service(repository: FakePermissionRepository) -> AuthorizationService {
    let repository = Arc::new(repository);
    AuthorizationService::new(repository.clone(), repository)
}

#[tokio::test]
async fn effective_matrix_overlays_user_entries_on_group() -> AppResult<()> {
    let group = PermissionGroup::new(
        2,
        NonEmptyString::new("Support")?,
        RoleMatrix::from_iter([
            (
                PermissionKey::new(Category::Users, Action::View),
                Level::Team,
            ),
            (
                PermissionKey::new(Category::Chat, Action::View),
                Level::Allowed,
            ),
        ]),
    );
    let repository = FakePermissionRepository::default()
        .with_group(group)
        .await
        .with_user(UserRoles {
            user_id: UserId::new(7),
            roles: cell(Category::Users, Action::View, Level::Denied),
            permission_group_id: Some(2),
        })
        .await;

    let matrix = service(repository).effective_matrix(UserId::new(7)).await?;

    assert_eq!(matrix.level_for(Category::Users, Action::View), Level::Denied);
    assert_eq!(matrix.level_for(Category::Chat, Action::View), Level::Allowed);
    Ok(())
}

#[tokio::test]
async fn unknown_user_has_empty_matrix() -> AppResult<()> {
    let matrix = service(FakePermissionRepository::default())
        .effective_matrix(UserId::new(404))
        .await?;

    assert!(matrix.is_empty());
    Ok(())
}

#[tokio::test]
async fn require_permission_accepts_only_allowed() -> AppResult<()> {
    let repository = FakePermissionRepository::default()
        .with_user(roles_for(
            1,
            cell(Category::Users, Action::Create, Level::Allowed),
        ))
        .await
        .with_user(roles_for(2, cell(Category::Users, Action::Create, Level::Team)))
        .await;
    let service = service(repository);

    service
        .require_permission(&actor(1), Category::Users, Action::Create)
        .await?;
    let result = service
        .require_permission(&actor(2), Category::Users, Action::Create)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    Ok(())
}

#[tokio::test]
async fn contextual_check_compares_responsible_user() -> AppResult<()> {
    let repository = FakePermissionRepository::default()
        .with_user(roles_for(
            5,
            cell(Category::Leads, Action::Edit, Level::IfResponsible),
        ))
        .await;
    let service = service(repository);
    let actor = actor(5);

    let own = service
        .resolve_access(
            &actor,
            Category::Leads,
            Action::Edit,
            &AccessContext::for_responsible(UserId::new(5)),
        )
        .await?;
    let foreign = service
        .can(
            &actor,
            Category::Leads,
            Action::Edit,
            &AccessContext::for_responsible(UserId::new(6)),
        )
        .await?;
    let listed = service
        .require_access(
            &actor,
            Category::Leads,
            Action::Edit,
            &AccessContext::skip_context_check(),
        )
        .await;

    assert_eq!(own, AccessDecision::GrantedResponsible);
    assert!(!foreign);
    assert!(listed.is_ok());
    Ok(())
}
