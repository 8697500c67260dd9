//! Application services and ports.

#![forbid(unsafe_code)]

mod role_ports;
mod role_service;

pub use role_ports::{PermissionRepository, RoleRelationPurge, RoleRepository};
pub use role_service::RoleService;
