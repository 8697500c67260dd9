use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use vault_domain::{PermissionId, RoleId};

use crate::dto::{
    CreateRoleRequest, PermissionIdsRequest, PermissionReference, PermissionResponse,
    RoleEditResponse, RoleRelationPurgeResponse, RoleResponse, RoleUserResponse,
    UpdateRoleRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod lifecycle;
mod permissions;

#[cfg(test)]
mod tests;

pub use lifecycle::{
    before_delete_role_handler, create_role_handler, delete_role_handler, edit_role_handler,
    list_roles_handler, update_role_handler,
};
pub use permissions::{
    attach_role_permission_handler, attach_role_permissions_handler,
    detach_role_permission_handler, detach_role_permissions_handler, list_permissions_handler,
    list_role_permissions_handler, list_role_users_handler, save_role_permissions_handler,
};
