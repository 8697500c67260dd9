use async_trait::async_trait;

use vault_core::{AppResult, NonEmptyString};
use vault_domain::{Permission, PermissionId, Role, RoleId, RoleUser};

use super::purge::RoleRelationPurge;

/// Repository port for role records and their join tables.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Inserts a role record.
    async fn create_role(&self, name: &NonEmptyString) -> AppResult<Role>;

    /// Finds a role by identifier.
    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>>;

    /// Lists all roles ordered by identifier.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Updates the display name of an existing role.
    async fn rename_role(&self, role_id: RoleId, name: &NonEmptyString) -> AppResult<Role>;

    /// Inserts a role record and its permission rows atomically.
    ///
    /// Nothing is stored when any permission is unknown.
    async fn create_role_with_permissions(
        &self,
        name: &NonEmptyString,
        permission_ids: &[PermissionId],
    ) -> AppResult<Role>;

    /// Renames a role and replaces its permission rows atomically.
    ///
    /// An empty `permission_ids` detaches every permission.
    async fn update_role_with_permissions(
        &self,
        role_id: RoleId,
        name: &NonEmptyString,
        permission_ids: &[PermissionId],
    ) -> AppResult<Role>;

    /// Lists users linked through the assigned-roles join table.
    async fn list_role_users(&self, role_id: RoleId) -> AppResult<Vec<RoleUser>>;

    /// Lists permissions linked through the permission-role join table.
    async fn list_role_permissions(&self, role_id: RoleId) -> AppResult<Vec<Permission>>;

    /// Replaces the role's permission rows with exactly the provided set.
    ///
    /// Implementations apply the replacement atomically.
    async fn sync_role_permissions(
        &self,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<()>;

    /// Removes every permission row of the role and returns the row count.
    async fn detach_all_role_permissions(&self, role_id: RoleId) -> AppResult<u64>;

    /// Inserts one permission row. Existing rows are left untouched.
    async fn attach_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()>;

    /// Removes one permission row and returns the row count.
    async fn detach_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<u64>;

    /// Removes every join row referencing the role, leaving the role record.
    async fn purge_role_relations(&self, role_id: RoleId) -> AppResult<RoleRelationPurge>;

    /// Removes the role's join rows and the role record in one transaction.
    async fn delete_role(&self, role_id: RoleId) -> AppResult<RoleRelationPurge>;
}

/// Repository port for the permission catalog.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Lists all known permissions ordered by identifier.
    async fn list_permissions(&self) -> AppResult<Vec<Permission>>;
}
