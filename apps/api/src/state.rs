use sqlx::PgPool;
use vault_application::RoleService;

use crate::views::RoleActionButtons;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub role_service: RoleService,
    pub role_buttons: RoleActionButtons,
    pub postgres_pool: Option<PgPool>,
}
