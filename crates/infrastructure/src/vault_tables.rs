use std::fmt::{Display, Formatter};

use vault_core::{AppError, AppResult};

const MAX_IDENTIFIER_BYTES: usize = 63;

/// SQL table reference, optionally schema-qualified (`schema.table`).
///
/// Table names are interpolated into statements, so only plain identifiers
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    /// Validates a table reference.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        let segments: Vec<&str> = trimmed.split('.').collect();

        if segments.len() > 2 || !segments.iter().all(|segment| is_identifier(segment)) {
            return Err(AppError::Validation(format!(
                "'{value}' is not a valid table name"
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the table reference as written in SQL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TableName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut characters = segment.chars();
    let Some(first) = characters.next() else {
        return false;
    };

    segment.len() <= MAX_IDENTIFIER_BYTES
        && (first.is_ascii_alphabetic() || first == '_')
        && characters.all(|character| character.is_ascii_alphanumeric() || character == '_')
}

/// Table names used by the role and permission adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultTables {
    /// Role records.
    pub roles: TableName,
    /// Join table between users and roles (`role_id`, `user_id`).
    pub assigned_roles: TableName,
    /// Permission records.
    pub permissions: TableName,
    /// Join table between permissions and roles (`permission_id`, `role_id`).
    pub permission_role: TableName,
    /// User records owned by the host application.
    pub users: TableName,
}

impl VaultTables {
    /// Builds a table set from raw names, validating each one.
    pub fn from_names(
        roles: &str,
        assigned_roles: &str,
        permissions: &str,
        permission_role: &str,
        users: &str,
    ) -> AppResult<Self> {
        Ok(Self {
            roles: TableName::new(roles)?,
            assigned_roles: TableName::new(assigned_roles)?,
            permissions: TableName::new(permissions)?,
            permission_role: TableName::new(permission_role)?,
            users: TableName::new(users)?,
        })
    }
}

impl Default for VaultTables {
    fn default() -> Self {
        Self {
            roles: TableName("roles".to_owned()),
            assigned_roles: TableName("assigned_roles".to_owned()),
            permissions: TableName("permissions".to_owned()),
            permission_role: TableName("permission_role".to_owned()),
            users: TableName("users".to_owned()),
        }
    }
}
