use tracing::debug;

use super::*;

impl PostgresRoleRepository {
    pub(super) async fn sync_role_permissions_impl(
        &self,
        role_id: RoleId,
        permission_ids: &[PermissionId],
    ) -> AppResult<()> {
        let mut transaction = self.begin().await?;
        replace_role_permissions(&mut transaction, &self.tables, role_id, permission_ids).await?;
        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(())
    }

    pub(super) async fn detach_all_role_permissions_impl(&self, role_id: RoleId) -> AppResult<u64> {
        let statement = format!(
            "DELETE FROM {permission_role} WHERE role_id = $1",
            permission_role = self.tables.permission_role
        );

        sqlx::query(statement.as_str())
            .bind(role_id.as_i64())
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected())
            .map_err(|error| {
                AppError::Internal(format!("failed to detach role permissions: {error}"))
            })
    }

    pub(super) async fn attach_role_permission_impl(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        let statement = format!(
            r#"
            INSERT INTO {permission_role} (permission_id, role_id)
            VALUES ($1, $2)
            ON CONFLICT (permission_id, role_id) DO NOTHING
            "#,
            permission_role = self.tables.permission_role
        );

        sqlx::query(statement.as_str())
            .bind(permission_id.as_i64())
            .bind(role_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                map_missing_reference(error, role_id, &format!("'{permission_id}'"))
            })?;

        Ok(())
    }

    pub(super) async fn detach_role_permission_impl(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<u64> {
        let statement = format!(
            r#"
            DELETE FROM {permission_role}
            WHERE role_id = $1
                AND permission_id = $2
            "#,
            permission_role = self.tables.permission_role
        );

        sqlx::query(statement.as_str())
            .bind(role_id.as_i64())
            .bind(permission_id.as_i64())
            .execute(&self.pool)
            .await
            .map(|result| result.rows_affected())
            .map_err(|error| {
                AppError::Internal(format!("failed to detach role permission: {error}"))
            })
    }
}

/// Makes `permission_ids` the role's exact permission set inside an open
/// transaction.
pub(super) async fn replace_role_permissions(
    transaction: &mut Transaction<'_, Postgres>,
    tables: &VaultTables,
    role_id: RoleId,
    permission_ids: &[PermissionId],
) -> AppResult<()> {
    let permission_ids: Vec<i64> = permission_ids.iter().map(PermissionId::as_i64).collect();

    let statement = format!(
        r#"
        DELETE FROM {permission_role}
        WHERE role_id = $1
            AND NOT (permission_id = ANY($2))
        "#,
        permission_role = tables.permission_role
    );
    let detached = sqlx::query(statement.as_str())
        .bind(role_id.as_i64())
        .bind(&permission_ids)
        .execute(&mut **transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to detach role permissions: {error}"))
        })?
        .rows_affected();

    let statement = format!(
        r#"
        INSERT INTO {permission_role} (permission_id, role_id)
        SELECT UNNEST($2::BIGINT[]), $1
        ON CONFLICT (permission_id, role_id) DO NOTHING
        "#,
        permission_role = tables.permission_role
    );
    let attached = sqlx::query(statement.as_str())
        .bind(role_id.as_i64())
        .bind(&permission_ids)
        .execute(&mut **transaction)
        .await
        .map_err(|error| map_missing_reference(error, role_id, &format!("{permission_ids:?}")))?
        .rows_affected();

    debug!(
        role_id = role_id.as_i64(),
        attached, detached, "synced role permissions"
    );

    Ok(())
}
