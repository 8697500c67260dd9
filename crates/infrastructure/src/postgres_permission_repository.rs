use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use vault_application::PermissionRepository;
use vault_core::{AppError, AppResult};
use vault_domain::{Permission, PermissionId};

use crate::VaultTables;

/// PostgreSQL-backed permission catalog.
#[derive(Clone)]
pub struct PostgresPermissionRepository {
    pool: PgPool,
    tables: VaultTables,
}

impl PostgresPermissionRepository {
    /// Creates a repository with the provided connection pool and table names.
    #[must_use]
    pub fn new(pool: PgPool, tables: VaultTables) -> Self {
        Self { pool, tables }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct PermissionRow {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) display_name: String,
}

impl TryFrom<PermissionRow> for Permission {
    type Error = AppError;

    fn try_from(row: PermissionRow) -> Result<Self, Self::Error> {
        Permission::new(PermissionId::new(row.id), row.name, row.display_name)
    }
}

#[async_trait]
impl PermissionRepository for PostgresPermissionRepository {
    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        let statement = format!(
            "SELECT id, name, display_name FROM {permissions} ORDER BY id",
            permissions = self.tables.permissions
        );

        sqlx::query_as::<_, PermissionRow>(statement.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list permissions: {error}")))?
            .into_iter()
            .map(Permission::try_from)
            .collect()
    }
}
