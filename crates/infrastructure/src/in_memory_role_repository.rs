use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use vault_application::{PermissionRepository, RoleRelationPurge, RoleRepository};
use vault_core::{AppError, AppResult, NonEmptyString};
use vault_domain::{Permission, PermissionId, Role, RoleId, RoleUser, UserId};


const MASTER_ADMIN_ROLE_NAME: &str = "Administrator";

#[derive(Debug, Default)]
struct VaultState {
    last_role_id: i64,
    roles: BTreeMap<RoleId, Role>,
    permissions: BTreeMap<PermissionId, Permission>,
    users: BTreeMap<UserId, RoleUser>,
    assigned_roles: BTreeSet<(RoleId, UserId)>,
    permission_role: BTreeSet<(RoleId, PermissionId)>,
}

impl VaultState {
    fn next_key<K: Ord>(keys: &BTreeMap<K, impl Sized>, key_value: impl Fn(&K) -> i64) -> i64 {
        keys.keys().next_back().map_or(1, |key| key_value(key) + 1)
    }

    fn seeded() -> Self {
        let roles: BTreeMap<RoleId, Role> = Role::new(RoleId::MASTER_ADMIN, MASTER_ADMIN_ROLE_NAME)
            .into_iter()
            .map(|role| (role.id(), role))
            .collect();

        Self {
            last_role_id: RoleId::MASTER_ADMIN.as_i64(),
            roles,
            ..Self::default()
        }
    }

    /// Role keys come from a sequence that never hands out a key twice.
    fn insert_role(&mut self, name: &NonEmptyString) -> AppResult<Role> {
        self.ensure_unique_role_name(name.as_str(), None)?;

        let role = Role::new(RoleId::new(self.last_role_id + 1), name.as_str())?;
        self.last_role_id += 1;
        self.roles.insert(role.id(), role.clone());
        Ok(role)
    }

    fn rename_role(&mut self, role_id: RoleId, name: &NonEmptyString) -> AppResult<Role> {
        self.ensure_unique_role_name(name.as_str(), Some(role_id))?;

        let role = self
            .roles
            .get_mut(&role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))?;
        *role = role.renamed(name.as_str())?;
        Ok(role.clone())
    }

    fn ensure_permissions(&self, permission_ids: &[PermissionId]) -> AppResult<()> {
        match permission_ids
            .iter()
            .find(|permission_id| !self.permissions.contains_key(permission_id))
        {
            Some(missing) => Err(AppError::NotFound(format!(
                "permission '{missing}' was not found"
            ))),
            None => Ok(()),
        }
    }

    fn replace_permissions(&mut self, role_id: RoleId, permission_ids: &[PermissionId]) {
        let requested: BTreeSet<PermissionId> = permission_ids.iter().copied().collect();
        self.permission_role
            .retain(|(stored_role_id, permission_id)| {
                *stored_role_id != role_id || requested.contains(permission_id)
            });
        self.permission_role
            .extend(requested.into_iter().map(|permission_id| (role_id, permission_id)));
    }

    fn ensure_unique_role_name(&self, name: &str, except: Option<RoleId>) -> AppResult<()> {
        let taken = self
            .roles
            .values()
            .any(|role| role.name().as_str() == name && Some(role.id()) != except);
        if taken {
            return Err(AppError::Conflict(format!("role '{name}' already exists")));
        }

        Ok(())
    }

    fn ensure_references(&self, role_id: RoleId, permission_id: PermissionId) -> AppResult<()> {
        if !self.roles.contains_key(&role_id) || !self.permissions.contains_key(&permission_id) {
            return Err(AppError::NotFound(format!(
                "role '{role_id}' or permission '{permission_id}' was not found"
            )));
        }

        Ok(())
    }

    fn purge(&mut self, role_id: RoleId) -> RoleRelationPurge {
        let users_before = self.assigned_roles.len();
        self.assigned_roles
            .retain(|(stored_role_id, _)| *stored_role_id != role_id);
        let permissions_before = self.permission_role.len();
        self.permission_role
            .retain(|(stored_role_id, _)| *stored_role_id != role_id);

        RoleRelationPurge {
            users_detached: (users_before - self.assigned_roles.len()) as u64,
            permissions_detached: (permissions_before - self.permission_role.len()) as u64,
        }
    }
}

/// In-memory role repository implementation.
///
/// Mirrors the relational adapter: the master admin role is seeded, join rows
/// reference existing records and each operation is applied under a single
/// write lock.
#[derive(Debug)]
pub struct InMemoryRoleRepository {
    state: RwLock<VaultState>,
}

impl InMemoryRoleRepository {
    /// Creates a repository holding only the master admin role.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(VaultState::seeded()),
        }
    }
}

impl Default for InMemoryRoleRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoleRepository {
    /// Adds a permission to the catalog.
    pub async fn insert_permission(&self, name: &str, display_name: &str) -> AppResult<Permission> {
        let mut state = self.state.write().await;
        if state
            .permissions
            .values()
            .any(|permission| permission.name().as_str() == name.trim())
        {
            return Err(AppError::Conflict(format!(
                "permission '{name}' already exists"
            )));
        }

        let id = VaultState::next_key(&state.permissions, PermissionId::as_i64);
        let permission = Permission::new(PermissionId::new(id), name, display_name)?;
        state.permissions.insert(permission.id(), permission.clone());
        Ok(permission)
    }

    /// Adds a user record.
    pub async fn insert_user(&self, name: &str, email: Option<&str>) -> RoleUser {
        let mut state = self.state.write().await;
        let id = UserId::new(VaultState::next_key(&state.users, UserId::as_i64));
        let user = RoleUser {
            id,
            name: name.to_owned(),
            email: email.map(str::to_owned),
        };
        state.users.insert(id, user.clone());
        user
    }

    /// Assigns an existing user to an existing role.
    pub async fn assign_user(&self, role_id: RoleId, user_id: UserId) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.roles.contains_key(&role_id) || !state.users.contains_key(&user_id) {
            return Err(AppError::NotFound(format!(
                "role '{role_id}' or user '{user_id}' was not found"
            )));
        }

        state.assigned_roles.insert((role_id, user_id));
        Ok(())
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn create_role(&self, name: &NonEmptyString) -> AppResult<Role> {
        self.state.write().await.insert_role(name)
    }

    async fn create_role_with_permissions(
        &self,
        name: &NonEmptyString,
        permission_ids: &[PermissionId],
    ) -> AppResult<Role> {
        let mut state = self.state.write().await;
        state.ensure_permissions(permission_ids)?;

        let role = state.insert_role(name)?;
        state.replace_permissions(role.id(), permission_ids);
        Ok(role)
    }

    async fn update_role_with_permissions(
        &self,
        role_id: RoleId,
        name: &NonEmptyString,
        permission_ids: &[PermissionId],
    ) -> AppResult<Role> {
        let mut state = self.state.write().await;
        if !state.roles.contains_key(&role_id) {
            return Err(AppError::NotFound(format!("role '{role_id}' was not found")));
        }
        state.ensure_permissions(permission_ids)?;

        let role = state.rename_role(role_id, name)?;
        state.replace_permissions(role_id, permission_ids);
        Ok(role)
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.state.read().await.roles.get(&role_id).cloned())
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.state.read().await.roles.values().cloned().collect())
    }

    async fn rename_role(&self, role_id: RoleId, name: &NonEmptyString) -> AppResult<Role> {
        self.state.write().await.rename_role(role_id, name)
    }

    async fn list_role_users(&self, role_id: RoleId) -> AppResult<Vec<RoleUser>> {
        let state = self.state.read().await;
        Ok(state
            .assigned_roles
            .range((role_id, UserId::new(i64::MIN))..=(role_id, UserId::new(i64::MAX)))
            .filter_map(|(_, user_id)| state.users.get(user_id).cloned())
            .collect())
    }

    async fn list_role_permissions(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
        let state = self.state.read().await;
        Ok(state
            .permission_role
            .range(
                (role_id, PermissionId::new(i64::MIN))..=(role_id, PermissionId::new(i64::MAX)),
            )
            .filter_map(|(_, permission_id)| state.permissions.get(permission_id).cloned())
            .collect())
    }

    async fn sync_role_permissions(
        &self,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        for permission_id in permission_ids {
            state.ensure_references(role_id, *permission_id)?;
        }

        state.replace_permissions(role_id, permission_ids);
        Ok(())
    }

    async fn detach_all_role_permissions(&self, role_id: RoleId) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let before = state.permission_role.len();
        state
            .permission_role
            .retain(|(stored_role_id, _)| *stored_role_id != role_id);
        Ok((before - state.permission_role.len()) as u64)
    }

    async fn attach_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        state.ensure_references(role_id, permission_id)?;
        state.permission_role.insert((role_id, permission_id));
        Ok(())
    }

    async fn detach_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<u64> {
        let removed = self
            .state
            .write()
            .await
            .permission_role
            .remove(&(role_id, permission_id));
        Ok(u64::from(removed))
    }

    async fn purge_role_relations(&self, role_id: RoleId) -> AppResult<RoleRelationPurge> {
        Ok(self.state.write().await.purge(role_id))
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<RoleRelationPurge> {
        let mut state = self.state.write().await;
        if !state.roles.contains_key(&role_id) {
            return Err(AppError::NotFound(format!("role '{role_id}' was not found")));
        }

        let purged = state.purge(role_id);
        state.roles.remove(&role_id);
        Ok(purged)
    }
}

#[async_trait]
impl PermissionRepository for InMemoryRoleRepository {
    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        Ok(self
            .state
            .read()
            .await
            .permissions
            .values()
            .cloned()
            .collect())
    }
}
