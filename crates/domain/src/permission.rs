use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use vault_core::{AppResult, NonEmptyString};

/// Integer primary key of a permission record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PermissionId(i64);

impl PermissionId {
    /// Creates a permission identifier from a stored key.
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

impl std::fmt::Display for PermissionId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// An atomic capability grantable to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    id: PermissionId,
    name: NonEmptyString,
    display_name: NonEmptyString,
}

impl Permission {
    /// Creates a permission record.
    pub fn new(
        id: PermissionId,
        name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            display_name: NonEmptyString::new(display_name)?,
        })
    }

    /// Returns the permission identifier.
    #[must_use]
    pub fn id(&self) -> PermissionId {
        self.id
    }

    /// Returns the machine name, e.g. `view-backend`.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the human readable label.
    #[must_use]
    pub fn display_name(&self) -> &NonEmptyString {
        &self.display_name
    }
}

impl From<&Permission> for PermissionId {
    fn from(value: &Permission) -> Self {
        value.id
    }
}

/// Collapses duplicate identifiers and returns them in ascending order.
#[must_use]
pub fn normalize_permission_ids(ids: &[PermissionId]) -> Vec<PermissionId> {
    ids.iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Permission, PermissionId, normalize_permission_ids};

    #[test]
    fn record_reference_resolves_to_its_identifier() {
        let permission = Permission::new(PermissionId::new(4), "view-backend", "View Backend")
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(PermissionId::from(&permission), PermissionId::new(4));
    }

    #[test]
    fn normalize_collapses_duplicates() {
        let ids = [3, 1, 3, 2, 1].map(PermissionId::new);
        assert_eq!(
            normalize_permission_ids(&ids),
            vec![
                PermissionId::new(1),
                PermissionId::new(2),
                PermissionId::new(3)
            ]
        );
    }

    #[test]
    fn blank_display_name_is_rejected() {
        let permission = Permission::new(PermissionId::new(1), "view-backend", " ");
        assert!(permission.is_err());
    }
}
