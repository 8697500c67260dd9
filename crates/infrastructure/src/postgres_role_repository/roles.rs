use super::permissions::replace_role_permissions;
use super::*;

impl PostgresRoleRepository {
    pub(super) async fn create_role_impl(&self, name: &NonEmptyString) -> AppResult<Role> {
        let row = sqlx::query_as::<_, RoleRow>(self.insert_role_statement().as_str())
            .bind(name.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|error| map_role_conflict(error, name.as_str()))?;

        info!(role_id = row.id, role_name = %name, "created role");
        Role::try_from(row)
    }

    pub(super) async fn create_role_with_permissions_impl(
        &self,
        name: &NonEmptyString,
        permission_ids: &[PermissionId],
    ) -> AppResult<Role> {
        let mut transaction = self.begin().await?;

        let row = sqlx::query_as::<_, RoleRow>(self.insert_role_statement().as_str())
            .bind(name.as_str())
            .fetch_one(&mut *transaction)
            .await
            .map_err(|error| map_role_conflict(error, name.as_str()))?;
        let role = Role::try_from(row)?;
        replace_role_permissions(&mut transaction, &self.tables, role.id(), permission_ids)
            .await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        info!(
            role_id = role.id().as_i64(),
            role_name = %name,
            permissions = permission_ids.len(),
            "created role"
        );
        Ok(role)
    }

    pub(super) async fn find_role_impl(&self, role_id: RoleId) -> AppResult<Option<Role>> {
        let statement = format!(
            "SELECT id, name FROM {roles} WHERE id = $1",
            roles = self.tables.roles
        );

        sqlx::query_as::<_, RoleRow>(statement.as_str())
            .bind(role_id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to find role: {error}")))?
            .map(Role::try_from)
            .transpose()
    }

    pub(super) async fn list_roles_impl(&self) -> AppResult<Vec<Role>> {
        let statement = format!(
            "SELECT id, name FROM {roles} ORDER BY id",
            roles = self.tables.roles
        );

        sqlx::query_as::<_, RoleRow>(statement.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list roles: {error}")))?
            .into_iter()
            .map(Role::try_from)
            .collect()
    }

    pub(super) async fn rename_role_impl(
        &self,
        role_id: RoleId,
        name: &NonEmptyString,
    ) -> AppResult<Role> {
        let row = sqlx::query_as::<_, RoleRow>(self.rename_role_statement().as_str())
            .bind(role_id.as_i64())
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| map_role_conflict(error, name.as_str()))?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))?;

        Role::try_from(row)
    }

    pub(super) async fn update_role_with_permissions_impl(
        &self,
        role_id: RoleId,
        name: &NonEmptyString,
        permission_ids: &[PermissionId],
    ) -> AppResult<Role> {
        let mut transaction = self.begin().await?;

        let row = sqlx::query_as::<_, RoleRow>(self.rename_role_statement().as_str())
            .bind(role_id.as_i64())
            .bind(name.as_str())
            .fetch_optional(&mut *transaction)
            .await
            .map_err(|error| map_role_conflict(error, name.as_str()))?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))?;
        let role = Role::try_from(row)?;
        replace_role_permissions(&mut transaction, &self.tables, role_id, permission_ids).await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        info!(
            role_id = role_id.as_i64(),
            role_name = %name,
            permissions = permission_ids.len(),
            "updated role"
        );
        Ok(role)
    }

    fn insert_role_statement(&self) -> String {
        format!(
            r#"
            INSERT INTO {roles} (name)
            VALUES ($1)
            RETURNING id, name
            "#,
            roles = self.tables.roles
        )
    }

    fn rename_role_statement(&self) -> String {
        format!(
            r#"
            UPDATE {roles}
            SET name = $2, updated_at = now()
            WHERE id = $1
            RETURNING id, name
            "#,
            roles = self.tables.roles
        )
    }
}
