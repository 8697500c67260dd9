mod purge;
mod repositories;

pub use purge::RoleRelationPurge;
pub use repositories::{PermissionRepository, RoleRepository};
