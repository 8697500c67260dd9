use axum::Router;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;
use vault_core::AppError;

use crate::handlers;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let role_routes = Router::new()
        .route(
            "/access/roles",
            get(handlers::roles::list_roles_handler).post(handlers::roles::create_role_handler),
        )
        .route(
            "/access/roles/{role_id}",
            put(handlers::roles::update_role_handler).delete(handlers::roles::delete_role_handler),
        )
        .route(
            "/access/roles/{role_id}/edit",
            get(handlers::roles::edit_role_handler),
        )
        .route(
            "/access/roles/{role_id}/before-delete",
            post(handlers::roles::before_delete_role_handler),
        )
        .route(
            "/access/roles/{role_id}/users",
            get(handlers::roles::list_role_users_handler),
        )
        .route(
            "/access/roles/{role_id}/permissions",
            get(handlers::roles::list_role_permissions_handler)
                .put(handlers::roles::save_role_permissions_handler),
        )
        .route(
            "/access/roles/{role_id}/permissions/attach",
            post(handlers::roles::attach_role_permissions_handler),
        )
        .route(
            "/access/roles/{role_id}/permissions/detach",
            post(handlers::roles::detach_role_permissions_handler),
        )
        .route(
            "/access/roles/{role_id}/permissions/{permission_id}",
            put(handlers::roles::attach_role_permission_handler)
                .delete(handlers::roles::detach_role_permission_handler),
        )
        .route(
            "/access/permissions",
            get(handlers::roles::list_permissions_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(role_routes)
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
