//! User projections read through role assignments.
//!
//! Users are owned by the host application; this crate only reads the
//! columns it needs to list the members of a role.

use serde::{Deserialize, Serialize};

/// Integer primary key of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    /// Creates a user identifier from a stored key.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer key.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// User assigned to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleUser {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email, when the user table provides one.
    pub email: Option<String>,
}
