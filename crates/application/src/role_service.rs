use std::sync::Arc;

use vault_core::{AppError, AppResult};
use vault_domain::{Role, RoleId};

use crate::role_ports::{PermissionRepository, RoleRepository};

mod lifecycle;
mod permissions;
mod relations;


/// Application service for role administration workflows.
#[derive(Clone)]
pub struct RoleService {
    repository: Arc<dyn RoleRepository>,
    permission_repository: Arc<dyn PermissionRepository>,
}

impl RoleService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        repository: Arc<dyn RoleRepository>,
        permission_repository: Arc<dyn PermissionRepository>,
    ) -> Self {
        Self {
            repository,
            permission_repository,
        }
    }

    async fn require_role(&self, role_id: RoleId) -> AppResult<Role> {
        self.repository
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))
    }
}
