use serde::{Deserialize, Serialize};
use ts_rs::TS;

mod conversions;

/// Permission reference accepted in request bodies.
///
/// Clients may send either the bare identifier or a permission object
/// carrying an `id` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "permission-reference.ts")]
pub enum PermissionReference {
    Id(i64),
    Record { id: i64 },
}

/// Incoming payload for role creation.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "create-role-request.ts")]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub permission_ids: Vec<PermissionReference>,
}

/// Incoming payload for the role edit form.
///
/// `permission_ids` is the complete permission set after the edit, so it is
/// required; an empty list detaches every permission.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "update-role-request.ts")]
pub struct UpdateRoleRequest {
    pub name: String,
    pub permission_ids: Vec<PermissionReference>,
}

/// Incoming payload listing permissions to save, attach, or detach.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "permission-ids-request.ts")]
pub struct PermissionIdsRequest {
    pub permission_ids: Vec<PermissionReference>,
}

/// API representation of a role row in the admin table.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "role-response.ts")]
pub struct RoleResponse {
    pub role_id: i64,
    pub name: String,
    pub is_protected: bool,
    pub edit_button: String,
    pub delete_button: String,
    pub action_buttons: String,
}

/// API representation of a permission.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "permission-response.ts")]
pub struct PermissionResponse {
    pub permission_id: i64,
    pub name: String,
    pub display_name: String,
}

/// API representation of a user assigned to a role.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "role-user-response.ts")]
pub struct RoleUserResponse {
    pub user_id: i64,
    pub name: String,
    pub email: Option<String>,
}

/// Payload backing the role edit form.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "role-edit-response.ts")]
pub struct RoleEditResponse {
    pub role: RoleResponse,
    pub permission_ids: Vec<i64>,
    pub permissions: Vec<PermissionResponse>,
}

/// Join rows removed while clearing a role's relations.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "role-relation-purge-response.ts")]
pub struct RoleRelationPurgeResponse {
    pub users_detached: u64,
    pub permissions_detached: u64,
}
