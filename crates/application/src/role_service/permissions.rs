use vault_core::AppResult;
use vault_domain::{PermissionId, RoleId, normalize_permission_ids};

use super::RoleService;

impl RoleService {
    /// Replaces the role's permissions with exactly `permission_ids`.
    ///
    /// An empty slice detaches every permission.
    pub async fn save_permissions(
        &self,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<()> {
        let role = self.require_role(role_id).await?;
        let permission_ids = normalize_permission_ids(permission_ids);

        if permission_ids.is_empty() {
            self.repository
                .detach_all_role_permissions(role.id())
                .await
                .map(|_| ())
        } else {
            self.repository
                .sync_role_permissions(role.id(), &permission_ids)
                .await
        }
    }

    /// Grants one permission to the role.
    pub async fn attach_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.repository
            .attach_role_permission(role_id, permission_id)
            .await
    }

    /// Revokes one permission from the role. Unknown pairs are ignored.
    pub async fn detach_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.repository
            .detach_role_permission(role_id, permission_id)
            .await
            .map(|_| ())
    }

    /// Grants each permission in order.
    ///
    /// Stops at the first failure; earlier grants are kept.
    pub async fn attach_permissions(
        &self,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<()> {
        for permission_id in permission_ids {
            self.attach_permission(role_id, *permission_id).await?;
        }

        Ok(())
    }

    /// Revokes each permission in order.
    ///
    /// Stops at the first failure; earlier revocations are kept.
    pub async fn detach_permissions(
        &self,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<()> {
        for permission_id in permission_ids {
            self.detach_permission(role_id, *permission_id).await?;
        }

        Ok(())
    }
}
