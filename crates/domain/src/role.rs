use serde::{Deserialize, Serialize};
use vault_core::{AppError, AppResult, NonEmptyString};

/// Integer primary key of a role record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleId(i64);

impl RoleId {
    /// Identifier of the master admin role, which can never be deleted.
    pub const MASTER_ADMIN: Self = Self(1);

    /// Creates a role identifier from a stored key.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer key.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Returns whether this identifier points at the master admin role.
    #[must_use]
    pub fn is_master_admin(&self) -> bool {
        *self == Self::MASTER_ADMIN
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A named grouping of permissions assignable to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: NonEmptyString,
}

impl Role {
    /// Creates a role from a stored identifier and display name.
    pub fn new(id: RoleId, name: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
        })
    }

    /// Returns the role identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns whether the role is protected from deletion.
    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.id.is_master_admin()
    }

    /// Fails when the role must not be deleted.
    pub fn ensure_deletable(&self) -> AppResult<()> {
        if self.is_protected() {
            return Err(AppError::Forbidden(format!(
                "role '{}' ({}) is the master admin role and cannot be deleted",
                self.name, self.id
            )));
        }

        Ok(())
    }

    /// Returns a copy of the role carrying a new display name.
    pub fn renamed(&self, name: impl Into<String>) -> AppResult<Self> {
        Self::new(self.id, name)
    }
}
