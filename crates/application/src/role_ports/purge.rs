/// Join rows removed while clearing a role's relations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleRelationPurge {
    /// Rows removed from the assigned-roles join table.
    pub users_detached: u64,
    /// Rows removed from the permission-role join table.
    pub permissions_detached: u64,
}

impl RoleRelationPurge {
    /// Returns the total number of join rows removed.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.users_detached + self.permissions_detached
    }
}
