use super::*;

impl PostgresRoleRepository {
    pub(super) async fn list_role_users_impl(&self, role_id: RoleId) -> AppResult<Vec<RoleUser>> {
        let statement = format!(
            r#"
            SELECT users.id, users.name, users.email
            FROM {users} AS users
            INNER JOIN {assigned_roles} AS assigned
                ON assigned.user_id = users.id
            WHERE assigned.role_id = $1
            ORDER BY users.id
            "#,
            users = self.tables.users,
            assigned_roles = self.tables.assigned_roles
        );

        let rows = sqlx::query_as::<_, RoleUserRow>(statement.as_str())
            .bind(role_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list role users: {error}")))?;

        Ok(rows.into_iter().map(RoleUser::from).collect())
    }

    pub(super) async fn list_role_permissions_impl(
        &self,
        role_id: RoleId,
    ) -> AppResult<Vec<Permission>> {
        let statement = format!(
            r#"
            SELECT permissions.id, permissions.name, permissions.display_name
            FROM {permissions} AS permissions
            INNER JOIN {permission_role} AS grants
                ON grants.permission_id = permissions.id
            WHERE grants.role_id = $1
            ORDER BY permissions.id
            "#,
            permissions = self.tables.permissions,
            permission_role = self.tables.permission_role
        );

        sqlx::query_as::<_, PermissionRow>(statement.as_str())
            .bind(role_id.as_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to list role permissions: {error}"))
            })?
            .into_iter()
            .map(Permission::try_from)
            .collect()
    }
}
