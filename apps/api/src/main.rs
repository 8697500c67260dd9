//! Vault API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod state;
mod views;

use std::sync::Arc;

use tracing::info;
use vault_application::RoleService;
use vault_core::AppError;
use vault_infrastructure::{PostgresPermissionRepository, PostgresRoleRepository};

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;
use crate::views::{RoleActionButtons, RoleRoutes};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let pool =
        api_services::connect_and_migrate(&config.database_url, config.database_max_connections)
            .await?;

    if config.migrate_only {
        info!("migrations applied");
        return Ok(());
    }

    let role_repository = Arc::new(PostgresRoleRepository::new(
        pool.clone(),
        config.tables.clone(),
    ));
    let permission_repository = Arc::new(PostgresPermissionRepository::new(
        pool.clone(),
        config.tables.clone(),
    ));

    let app_state = AppState {
        role_service: RoleService::new(role_repository, permission_repository),
        role_buttons: RoleActionButtons::new(RoleRoutes::new(config.app_base_url.as_str())),
        postgres_pool: Some(pool),
    };

    let app = api_router::build_router(app_state, config.frontend_url.as_str())?;
    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind API listener: {error}")))?;

    info!(%address, "vault api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server failed: {error}")))
}
