use tracing::{info, warn};
use vault_core::AppError;

use super::*;

pub async fn list_roles_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .role_service
        .list_roles()
        .await?
        .iter()
        .map(|role| RoleResponse::from_role(role, &state.role_buttons))
        .collect();

    Ok(Json(roles))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let role = state
        .role_service
        .create_role_with_permissions(
            payload.name.as_str(),
            &PermissionReference::resolve_all(payload.permission_ids),
        )
        .await?;

    info!(role_id = %role.id(), name = %role.name(), "role created");

    Ok((
        StatusCode::CREATED,
        Json(RoleResponse::from_role(&role, &state.role_buttons)),
    ))
}

pub async fn edit_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> ApiResult<Json<RoleEditResponse>> {
    let role = state.role_service.find_role(RoleId::new(role_id)).await?;
    let permission_ids = state
        .role_service
        .permissions(role.id())
        .await?
        .iter()
        .map(|permission| PermissionId::from(permission).as_i64())
        .collect();
    let permissions = state
        .role_service
        .list_permissions()
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(RoleEditResponse {
        role: RoleResponse::from_role(&role, &state.role_buttons),
        permission_ids,
        permissions,
    }))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
    Json(payload): Json<UpdateRoleRequest>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .role_service
        .update_role(
            RoleId::new(role_id),
            payload.name.as_str(),
            &PermissionReference::resolve_all(payload.permission_ids),
        )
        .await?;

    info!(role_id = %role.id(), name = %role.name(), "role updated");

    Ok(Json(RoleResponse::from_role(&role, &state.role_buttons)))
}

pub async fn before_delete_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> ApiResult<Json<RoleRelationPurgeResponse>> {
    let purge = state
        .role_service
        .before_delete(RoleId::new(role_id))
        .await?;

    Ok(Json(RoleRelationPurgeResponse::from(purge)))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> ApiResult<Json<RoleRelationPurgeResponse>> {
    let role_id = RoleId::new(role_id);
    let purge = match state.role_service.delete_role(role_id).await {
        Ok(purge) => purge,
        Err(error @ AppError::Forbidden(_)) => {
            warn!(%role_id, "refused to delete protected role");
            return Err(error.into());
        }
        Err(error) => return Err(error.into()),
    };

    info!(
        %role_id,
        users_detached = purge.users_detached,
        permissions_detached = purge.permissions_detached,
        "role deleted"
    );

    Ok(Json(RoleRelationPurgeResponse::from(purge)))
}
