use serde::Serialize;
use ts_rs::TS;

mod roles;

pub use roles::{
    CreateRoleRequest, PermissionIdsRequest, PermissionReference, PermissionResponse,
    RoleEditResponse, RoleRelationPurgeResponse, RoleResponse, RoleUserResponse,
    UpdateRoleRequest,
};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "health-response.ts")]
pub struct HealthResponse {
    pub status: &'static str,
    pub postgres: &'static str,
    pub detail: Option<String>,
}
