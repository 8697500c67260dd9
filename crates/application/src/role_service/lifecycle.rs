use vault_core::{AppResult, NonEmptyString};
use vault_domain::{PermissionId, Role, RoleId, normalize_permission_ids};

use crate::role_ports::RoleRelationPurge;

use super::RoleService;

impl RoleService {
    /// Creates a role record.
    pub async fn create_role(&self, name: &str) -> AppResult<Role> {
        let name = NonEmptyString::new(name)?;
        self.repository.create_role(&name).await
    }

    /// Creates a role already granted `permission_ids`.
    ///
    /// The role is not created when any permission is unknown.
    pub async fn create_role_with_permissions(
        &self,
        name: &str,
        permission_ids: &[PermissionId],
    ) -> AppResult<Role> {
        let name = NonEmptyString::new(name)?;
        let permission_ids = normalize_permission_ids(permission_ids);
        self.repository
            .create_role_with_permissions(&name, &permission_ids)
            .await
    }

    /// Renames a role and replaces its permissions in one step.
    pub async fn update_role(
        &self,
        role_id: RoleId,
        name: &str,
        permission_ids: &[PermissionId],
    ) -> AppResult<Role> {
        let role = self.require_role(role_id).await?.renamed(name)?;
        let permission_ids = normalize_permission_ids(permission_ids);
        self.repository
            .update_role_with_permissions(role.id(), role.name(), &permission_ids)
            .await
    }

    /// Returns one role or a not-found error.
    pub async fn find_role(&self, role_id: RoleId) -> AppResult<Role> {
        self.require_role(role_id).await
    }

    /// Lists all roles.
    pub async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.repository.list_roles().await
    }

    /// Changes the display name of a role.
    pub async fn rename_role(&self, role_id: RoleId, name: &str) -> AppResult<Role> {
        let role = self.require_role(role_id).await?.renamed(name)?;
        self.repository.rename_role(role.id(), role.name()).await
    }

    /// Clears both join tables for the role without deleting the record.
    ///
    /// This is the manual cascade step for stores that do not cascade
    /// foreign keys. [`RoleService::delete_role`] performs it implicitly.
    pub async fn before_delete(&self, role_id: RoleId) -> AppResult<RoleRelationPurge> {
        let role = self.require_role(role_id).await?;
        self.repository.purge_role_relations(role.id()).await
    }

    /// Deletes a role together with its join rows.
    ///
    /// The master admin role is refused before any row is touched.
    pub async fn delete_role(&self, role_id: RoleId) -> AppResult<RoleRelationPurge> {
        let role = self.require_role(role_id).await?;
        role.ensure_deletable()?;
        self.repository.delete_role(role.id()).await
    }
}
