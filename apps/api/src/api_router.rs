use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use pandatur_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/permissions/vocabulary",
            get(handlers::security::permission_vocabulary_handler),
        )
        .route(
            "/api/permissions/check",
            post(handlers::security::check_permission_handler),
        )
        .route(
            "/api/permissions/me",
            get(handlers::security::my_permissions_handler),
        )
        .route(
            "/api/permission-groups",
            get(handlers::security::list_permission_groups_handler)
                .post(handlers::security::create_permission_group_handler),
        )
        .route(
            "/api/permission-groups/{permission_id}",
            get(handlers::security::permission_group_handler)
                .put(handlers::security::update_permission_group_handler)
                .delete(handlers::security::delete_permission_group_handler),
        )
        .route(
            "/api/users/{user_id}/roles",
            get(handlers::security::user_roles_handler)
                .put(handlers::security::update_user_roles_handler),
        )
        .route(
            "/api/users/{user_id}/permission-group",
            put(handlers::security::assign_permission_group_handler)
                .delete(handlers::security::remove_permission_group_handler),
        )
        .route_layer(from_fn(middleware::require_actor));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(from_fn_with_state(
            app_state.clone(),
            middleware::localize_errors,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
