use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::info;

use vault_application::{RoleRelationPurge, RoleRepository};
use vault_core::{AppError, AppResult, NonEmptyString};
use vault_domain::{Permission, PermissionId, Role, RoleId, RoleUser, UserId};

use crate::VaultTables;
use crate::postgres_permission_repository::PermissionRow;

mod permissions;
mod relations;
mod roles;


/// PostgreSQL-backed repository for roles and their join tables.
#[derive(Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
    tables: VaultTables,
}

impl PostgresRoleRepository {
    /// Creates a repository with the provided connection pool and table names.
    #[must_use]
    pub fn new(pool: PgPool, tables: VaultTables) -> Self {
        Self { pool, tables }
    }

    async fn begin(&self) -> AppResult<Transaction<'_, Postgres>> {
        self.pool
            .begin()
            .await
            .map_err(|error| AppError::Internal(format!("failed to begin transaction: {error}")))
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: i64,
    name: String,
}

impl TryFrom<RoleRow> for Role {
    type Error = AppError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        Role::new(RoleId::new(row.id), row.name)
    }
}

#[derive(Debug, FromRow)]
struct RoleUserRow {
    id: i64,
    name: String,
    email: Option<String>,
}

impl From<RoleUserRow> for RoleUser {
    fn from(row: RoleUserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            name: row.name,
            email: row.email,
        }
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn create_role(&self, name: &NonEmptyString) -> AppResult<Role> {
        self.create_role_impl(name).await
    }

    async fn create_role_with_permissions(
        &self,
        name: &NonEmptyString,
        permission_ids: &[PermissionId],
    ) -> AppResult<Role> {
        self.create_role_with_permissions_impl(name, permission_ids)
            .await
    }

    async fn update_role_with_permissions(
        &self,
        role_id: RoleId,
        name: &NonEmptyString,
        permission_ids: &[PermissionId],
    ) -> AppResult<Role> {
        self.update_role_with_permissions_impl(role_id, name, permission_ids)
            .await
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        self.find_role_impl(role_id).await
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.list_roles_impl().await
    }

    async fn rename_role(&self, role_id: RoleId, name: &NonEmptyString) -> AppResult<Role> {
        self.rename_role_impl(role_id, name).await
    }

    async fn list_role_users(&self, role_id: RoleId) -> AppResult<Vec<RoleUser>> {
        self.list_role_users_impl(role_id).await
    }

    async fn list_role_permissions(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
        self.list_role_permissions_impl(role_id).await
    }

    async fn sync_role_permissions(
        &self,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<()> {
        self.sync_role_permissions_impl(role_id, permission_ids)
            .await
    }

    async fn detach_all_role_permissions(&self, role_id: RoleId) -> AppResult<u64> {
        self.detach_all_role_permissions_impl(role_id).await
    }

    async fn attach_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        self.attach_role_permission_impl(role_id, permission_id)
            .await
    }

    async fn detach_role_permission(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<u64> {
        self.detach_role_permission_impl(role_id, permission_id)
            .await
    }

    async fn purge_role_relations(&self, role_id: RoleId) -> AppResult<RoleRelationPurge> {
        let mut transaction = self.begin().await?;
        let purged = purge_role_relations(&mut transaction, &self.tables, role_id).await?;
        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        info!(
            role_id = role_id.as_i64(),
            users_detached = purged.users_detached,
            permissions_detached = purged.permissions_detached,
            "cleared role relations"
        );

        Ok(purged)
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<RoleRelationPurge> {
        let mut transaction = self.begin().await?;
        let purged = purge_role_relations(&mut transaction, &self.tables, role_id).await?;

        let statement = format!("DELETE FROM {roles} WHERE id = $1", roles = self.tables.roles);
        let rows_affected = sqlx::query(statement.as_str())
            .bind(role_id.as_i64())
            .execute(&mut *transaction)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete role: {error}")))?
            .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!("role '{role_id}' was not found")));
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        info!(
            role_id = role_id.as_i64(),
            users_detached = purged.users_detached,
            permissions_detached = purged.permissions_detached,
            "deleted role"
        );

        Ok(purged)
    }
}

/// Deletes every join row referencing the role inside an open transaction.
async fn purge_role_relations(
    transaction: &mut Transaction<'_, Postgres>,
    tables: &VaultTables,
    role_id: RoleId,
) -> AppResult<RoleRelationPurge> {
    let statement = format!(
        "DELETE FROM {assigned_roles} WHERE role_id = $1",
        assigned_roles = tables.assigned_roles
    );
    let users_detached = sqlx::query(statement.as_str())
        .bind(role_id.as_i64())
        .execute(&mut **transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to clear role assignments: {error}"))
        })?
        .rows_affected();

    let statement = format!(
        "DELETE FROM {permission_role} WHERE role_id = $1",
        permission_role = tables.permission_role
    );
    let permissions_detached = sqlx::query(statement.as_str())
        .bind(role_id.as_i64())
        .execute(&mut **transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to clear role permissions: {error}"))
        })?
        .rows_affected();

    Ok(RoleRelationPurge {
        users_detached,
        permissions_detached,
    })
}

fn map_role_conflict(error: sqlx::Error, role_name: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(format!("role '{role_name}' already exists"));
    }

    AppError::Internal(format!("failed to save role: {error}"))
}

fn map_missing_reference(error: sqlx::Error, role_id: RoleId, permissions: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23503")
    {
        return AppError::NotFound(format!(
            "role '{role_id}' or permission {permissions} was not found"
        ));
    }

    AppError::Internal(format!("failed to persist role permissions: {error}"))
}
