use chrono::Utc;
use pandatur_application::{NewPermissionGroup, PermissionGroupRepository, UserRoleRepository};
use pandatur_core::{AppError, NonEmptyString, UserId};
use pandatur_domain::{Action, Category, Level, PermissionKey, RoleMatrix, UserRoles};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use crate::PostgresUserRoleRepository;

use super::PostgresPermissionGroupRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for permission group tests: {error}");
    }

    Some(pool)
}

fn unique_name(prefix: &str) -> NonEmptyString {
    let name = format!("{prefix} {}", Utc::now().timestamp_nanos_opt().unwrap_or_default());
    match NonEmptyString::new(name) {
        Ok(name) => name,
        Err(error) => panic!("generated group name is empty: {error}"),
    }
}

fn unique_user_id() -> UserId {
    UserId::new(Utc::now().timestamp_micros())
}

#[tokio::test]
async fn group_roles_round_trip_and_names_stay_unique() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresPermissionGroupRepository::new(pool);
    let permission_name = unique_name("Support");
    let roles = RoleMatrix::from_iter([
        (
            PermissionKey::new(Category::Chat, Action::View),
            Level::Allowed,
        ),
        (
            PermissionKey::new(Category::Leads, Action::Edit),
            Level::IfResponsible,
        ),
    ]);

    let created = repository
        .create_permission_group(NewPermissionGroup {
            permission_name: permission_name.clone(),
            roles: roles.clone(),
        })
        .await;
    let Ok(created) = created else {
        panic!("failed to create permission group: {created:?}");
    };
    assert_eq!(created.roles(), &roles);

    let found = repository
        .find_permission_group(created.permission_id())
        .await;
    assert!(matches!(found, Ok(Some(group)) if group == created));

    let duplicate = repository
        .create_permission_group(NewPermissionGroup {
            permission_name,
            roles: RoleMatrix::new(),
        })
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn deleting_group_detaches_user_records() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let groups = PostgresPermissionGroupRepository::new(pool.clone());
    let users = PostgresUserRoleRepository::new(pool);

    let group = groups
        .create_permission_group(NewPermissionGroup {
            permission_name: unique_name("Operators"),
            roles: RoleMatrix::new(),
        })
        .await;
    let Ok(group) = group else {
        panic!("failed to create permission group: {group:?}");
    };

    let user_id = unique_user_id();
    let record = UserRoles {
        user_id,
        roles: RoleMatrix::from_iter([(
            PermissionKey::new(Category::Users, Action::View),
            Level::Denied,
        )]),
        permission_group_id: Some(group.permission_id()),
    };
    assert!(users.save_user_roles(record.clone()).await.is_ok());
    assert!(matches!(
        users.find_user_roles(user_id).await,
        Ok(Some(stored)) if stored == record
    ));

    assert!(
        groups
            .delete_permission_group(group.permission_id())
            .await
            .is_ok()
    );

    let detached = users.find_user_roles(user_id).await;
    assert!(matches!(
        detached,
        Ok(Some(stored)) if stored.permission_group_id.is_none() && stored.roles.len() == 1
    ));
}

#[tokio::test]
async fn saving_roles_for_missing_group_is_not_found() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let users = PostgresUserRoleRepository::new(pool);
    let result = users
        .save_user_roles(UserRoles {
            user_id: unique_user_id(),
            roles: RoleMatrix::new(),
            permission_group_id: Some(i64::MAX),
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}
