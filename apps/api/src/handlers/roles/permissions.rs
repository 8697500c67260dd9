use super::*;

pub async fn list_role_users_handler(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> ApiResult<Json<Vec<RoleUserResponse>>> {
    let users = state
        .role_service
        .users(RoleId::new(role_id))
        .await?
        .into_iter()
        .map(RoleUserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn list_role_permissions_handler(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .role_service
        .permissions(RoleId::new(role_id))
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn save_role_permissions_handler(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
    Json(payload): Json<PermissionIdsRequest>,
) -> ApiResult<StatusCode> {
    state
        .role_service
        .save_permissions(
            RoleId::new(role_id),
            &PermissionReference::resolve_all(payload.permission_ids),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn attach_role_permissions_handler(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
    Json(payload): Json<PermissionIdsRequest>,
) -> ApiResult<StatusCode> {
    state
        .role_service
        .attach_permissions(
            RoleId::new(role_id),
            &PermissionReference::resolve_all(payload.permission_ids),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn detach_role_permissions_handler(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
    Json(payload): Json<PermissionIdsRequest>,
) -> ApiResult<StatusCode> {
    state
        .role_service
        .detach_permissions(
            RoleId::new(role_id),
            &PermissionReference::resolve_all(payload.permission_ids),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn attach_role_permission_handler(
    State(state): State<AppState>,
    Path((role_id, permission_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state
        .role_service
        .attach_permission(RoleId::new(role_id), PermissionId::new(permission_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn detach_role_permission_handler(
    State(state): State<AppState>,
    Path((role_id, permission_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state
        .role_service
        .detach_permission(RoleId::new(role_id), PermissionId::new(permission_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_permissions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .role_service
        .list_permissions()
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}
