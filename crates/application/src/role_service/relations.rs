use vault_core::AppResult;
use vault_domain::{Permission, RoleId, RoleUser};

use super::RoleService;

impl RoleService {
    /// Returns users assigned to the role.
    pub async fn users(&self, role_id: RoleId) -> AppResult<Vec<RoleUser>> {
        let role = self.require_role(role_id).await?;
        self.repository.list_role_users(role.id()).await
    }

    /// Returns permissions granted to the role.
    pub async fn permissions(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
        let role = self.require_role(role_id).await?;
        self.repository.list_role_permissions(role.id()).await
    }

    /// Returns the full permission catalog.
    pub async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        self.permission_repository.list_permissions().await
    }
}
