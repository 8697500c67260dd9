//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_role_repository;
mod postgres_permission_repository;
mod postgres_role_repository;
mod vault_tables;

pub use in_memory_role_repository::InMemoryRoleRepository;
pub use postgres_permission_repository::PostgresPermissionRepository;
pub use postgres_role_repository::PostgresRoleRepository;
pub use vault_tables::{TableName, VaultTables};
