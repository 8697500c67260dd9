use vault_application::RoleRelationPurge;
use vault_domain::{Permission, PermissionId, Role, RoleUser};

use crate::views::RoleActionButtons;

use super::{
    PermissionReference, PermissionResponse, RoleRelationPurgeResponse, RoleResponse,
    RoleUserResponse,
};

impl From<PermissionReference> for PermissionId {
    fn from(value: PermissionReference) -> Self {
        match value {
            PermissionReference::Id(id) | PermissionReference::Record { id } => {
                PermissionId::new(id)
            }
        }
    }
}

impl PermissionReference {
    /// Resolves a list of references to typed identifiers.
    pub fn resolve_all(references: Vec<Self>) -> Vec<PermissionId> {
        references.into_iter().map(PermissionId::from).collect()
    }
}

impl RoleResponse {
    pub fn from_role(role: &Role, buttons: &RoleActionButtons) -> Self {
        Self {
            role_id: role.id().as_i64(),
            name: role.name().as_str().to_owned(),
            is_protected: role.is_protected(),
            edit_button: buttons.edit_button(role),
            delete_button: buttons.delete_button(role),
            action_buttons: buttons.action_buttons(role),
        }
    }
}

impl From<Permission> for PermissionResponse {
    fn from(value: Permission) -> Self {
        Self {
            permission_id: value.id().as_i64(),
            name: value.name().as_str().to_owned(),
            display_name: value.display_name().as_str().to_owned(),
        }
    }
}

impl From<RoleUser> for RoleUserResponse {
    fn from(value: RoleUser) -> Self {
        Self {
            user_id: value.id.as_i64(),
            name: value.name,
            email: value.email,
        }
    }
}

impl From<RoleRelationPurge> for RoleRelationPurgeResponse {
    fn from(value: RoleRelationPurge) -> Self {
        Self {
            users_detached: value.users_detached,
            permissions_detached: value.permissions_detached,
        }
    }
}
