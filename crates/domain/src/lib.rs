//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod permission;
mod role;
mod user;

pub use permission::{Permission, PermissionId, normalize_permission_ids};
pub use role::{Role, RoleId};
pub use user::{RoleUser, UserId};
