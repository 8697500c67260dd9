use std::sync::Arc;

use axum::response::IntoResponse;
use vault_application::RoleService;
use vault_infrastructure::InMemoryRoleRepository;

use crate::views::{RoleActionButtons, RoleRoutes};

use super::*;

fn build_state() -> (AppState, Arc<InMemoryRoleRepository>) {
    let repository = Arc::new(InMemoryRoleRepository::new());
    let state = AppState {
        role_service: RoleService::new(repository.clone(), repository.clone()),
        role_buttons: RoleActionButtons::new(RoleRoutes::new("https://admin.test")),
        postgres_pool: None,
    };

    (state, repository)
}

fn status_of<T>(result: ApiResult<T>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(error) => error.into_response().status(),
    }
}

fn references(payload: &str) -> Vec<PermissionReference> {
    serde_json::from_str(payload).unwrap_or_default()
}

async fn create(state: &AppState, name: &str, permission_ids: Vec<PermissionReference>) -> i64 {
    let (status, Json(role)) = create_role_handler(
        State(state.clone()),
        Json(CreateRoleRequest {
            name: name.to_owned(),
            permission_ids,
        }),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    assert_eq!(status, StatusCode::CREATED);

    role.role_id
}

#[test]
fn permission_references_accept_ids_and_records() {
    let parsed = references(r#"[3, {"id": 3}, {"id": 5, "name": "users.manage"}]"#);

    assert_eq!(
        PermissionReference::resolve_all(parsed),
        vec![
            PermissionId::new(3),
            PermissionId::new(3),
            PermissionId::new(5)
        ]
    );
}

#[tokio::test]
async fn listed_roles_carry_action_buttons() {
    let (state, _) = build_state();
    create(&state, "Editor", Vec::new()).await;

    let Json(roles) = list_roles_handler(State(state))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].name, "Administrator");
    assert!(roles[0].is_protected);
    assert!(roles[0].delete_button.is_empty());
    assert!(roles[0].action_buttons.ends_with(' '));
    assert!(!roles[1].is_protected);
    assert!(
        roles[1]
            .delete_button
            .contains(r#"href="https://admin.test/access/roles/2""#)
    );
    assert!(
        roles[1]
            .edit_button
            .contains(r#"href="https://admin.test/access/roles/2/edit""#)
    );
}

#[tokio::test]
async fn create_role_applies_permission_payload() {
    let (state, repository) = build_state();
    let view = repository
        .insert_permission("view-backend", "View Backend")
        .await
        .unwrap_or_else(|_| unreachable!());
    repository
        .insert_permission("manage-users", "Manage Users")
        .await
        .unwrap_or_else(|_| unreachable!());

    let role_id = create(&state, "Moderator", references(r#"[{"id": 1}, 2, 2]"#)).await;

    let Json(permissions) = list_role_permissions_handler(State(state), Path(role_id))
        .await
        .unwrap_or_else(|_| unreachable!());
    let names: Vec<_> = permissions.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["view-backend", "manage-users"]);
    assert_eq!(permissions[0].permission_id, view.id().as_i64());
}

#[tokio::test]
async fn edit_payload_lists_assigned_ids_and_catalog() {
    let (state, repository) = build_state();
    for (name, display_name) in [("a", "A"), ("b", "B"), ("c", "C")] {
        repository
            .insert_permission(name, display_name)
            .await
            .unwrap_or_else(|_| unreachable!());
    }
    let role_id = create(&state, "Moderator", references("[3, 1]")).await;

    let Json(edit) = edit_role_handler(State(state), Path(role_id))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(edit.role.name, "Moderator");
    assert!(!edit.role.is_protected);
    assert_eq!(edit.permission_ids, vec![1, 3]);
    assert_eq!(edit.permissions.len(), 3);
}

#[tokio::test]
async fn update_role_renames_and_replaces_permissions() {
    let (state, repository) = build_state();
    for (name, display_name) in [("a", "A"), ("b", "B")] {
        repository
            .insert_permission(name, display_name)
            .await
            .unwrap_or_else(|_| unreachable!());
    }
    let role_id = create(&state, "Editor", references("[1]")).await;

    let Json(role) = update_role_handler(
        State(state.clone()),
        Path(role_id),
        Json(UpdateRoleRequest {
            name: "  Senior Editor ".to_owned(),
            permission_ids: references(r#"[{"id": 2}]"#),
        }),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    assert_eq!(role.name, "Senior Editor");

    let Json(permissions) = list_role_permissions_handler(State(state), Path(role_id))
        .await
        .unwrap_or_else(|_| unreachable!());
    let ids: Vec<_> = permissions.iter().map(|item| item.permission_id).collect();
    assert_eq!(ids, vec![2]);
}

#[tokio::test]
async fn saving_empty_permission_list_detaches_everything() {
    let (state, repository) = build_state();
    repository
        .insert_permission("a", "A")
        .await
        .unwrap_or_else(|_| unreachable!());
    let role_id = create(&state, "Moderator", references("[1]")).await;

    let status = save_role_permissions_handler(
        State(state.clone()),
        Path(role_id),
        Json(PermissionIdsRequest {
            permission_ids: Vec::new(),
        }),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    assert_eq!(status, StatusCode::NO_CONTENT);

    let Json(permissions) = list_role_permissions_handler(State(state), Path(role_id))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(permissions.is_empty());
}

#[tokio::test]
async fn single_permission_routes_attach_and_detach() {
    let (state, repository) = build_state();
    repository
        .insert_permission("a", "A")
        .await
        .unwrap_or_else(|_| unreachable!());
    let role_id = create(&state, "Moderator", Vec::new()).await;

    for _ in 0..2 {
        let status = attach_role_permission_handler(State(state.clone()), Path((role_id, 1)))
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
    let Json(permissions) = list_role_permissions_handler(State(state.clone()), Path(role_id))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(permissions.len(), 1);

    for _ in 0..2 {
        let status = detach_role_permission_handler(State(state.clone()), Path((role_id, 1)))
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
    let Json(permissions) = list_role_permissions_handler(State(state), Path(role_id))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(permissions.is_empty());
}

#[tokio::test]
async fn bulk_attach_stops_at_unknown_permission() {
    let (state, repository) = build_state();
    repository
        .insert_permission("a", "A")
        .await
        .unwrap_or_else(|_| unreachable!());
    let role_id = create(&state, "Moderator", Vec::new()).await;

    let status = status_of(
        attach_role_permissions_handler(
            State(state.clone()),
            Path(role_id),
            Json(PermissionIdsRequest {
                permission_ids: references("[1, 99]"),
            }),
        )
        .await,
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let Json(permissions) = list_role_permissions_handler(State(state.clone()), Path(role_id))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(permissions.len(), 1);

    let status = detach_role_permissions_handler(
        State(state),
        Path(role_id),
        Json(PermissionIdsRequest {
            permission_ids: references("[1, 99]"),
        }),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn before_delete_clears_relations_and_keeps_role() {
    let (state, repository) = build_state();
    repository
        .insert_permission("a", "A")
        .await
        .unwrap_or_else(|_| unreachable!());
    let role_id = create(&state, "Moderator", references("[1]")).await;
    let user = repository.insert_user("Ada", Some("ada@example.com")).await;
    repository
        .assign_user(RoleId::new(role_id), user.id)
        .await
        .unwrap_or_else(|_| unreachable!());

    let Json(users) = list_role_users_handler(State(state.clone()), Path(role_id))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_id, user.id.as_i64());
    assert_eq!(users[0].email.as_deref(), Some("ada@example.com"));

    let Json(purge) = before_delete_role_handler(State(state.clone()), Path(role_id))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(purge.users_detached, 1);
    assert_eq!(purge.permissions_detached, 1);

    let Json(users) = list_role_users_handler(State(state.clone()), Path(role_id))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(users.is_empty());
    assert_eq!(
        status_of(edit_role_handler(State(state), Path(role_id)).await),
        StatusCode::OK
    );
}

#[tokio::test]
async fn delete_refuses_master_admin_and_removes_others() {
    let (state, repository) = build_state();
    let admin_id = RoleId::MASTER_ADMIN.as_i64();
    let editor_id = create(&state, "Editor", Vec::new()).await;
    let user = repository.insert_user("Grace", None).await;
    repository
        .assign_user(RoleId::new(editor_id), user.id)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(
        status_of(delete_role_handler(State(state.clone()), Path(admin_id)).await),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        status_of(delete_role_handler(State(state.clone()), Path(99)).await),
        StatusCode::NOT_FOUND
    );

    let Json(purge) = delete_role_handler(State(state.clone()), Path(editor_id))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(purge.users_detached, 1);
    assert_eq!(purge.permissions_detached, 0);

    let Json(roles) = list_roles_handler(State(state))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].role_id, admin_id);
}

#[tokio::test]
async fn duplicate_and_blank_names_are_rejected() {
    let (state, _) = build_state();

    let duplicate = create_role_handler(
        State(state.clone()),
        Json(CreateRoleRequest {
            name: "Administrator".to_owned(),
            permission_ids: Vec::new(),
        }),
    )
    .await;
    assert_eq!(status_of(duplicate), StatusCode::CONFLICT);

    let blank = create_role_handler(
        State(state.clone()),
        Json(CreateRoleRequest {
            name: "   ".to_owned(),
            permission_ids: Vec::new(),
        }),
    )
    .await;
    assert_eq!(status_of(blank), StatusCode::BAD_REQUEST);

    let Json(permissions) = list_permissions_handler(State(state))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(permissions.is_empty());
}

#[tokio::test]
async fn create_with_unknown_permission_leaves_no_role_behind() {
    let (state, repository) = build_state();
    repository
        .insert_permission("a", "A")
        .await
        .unwrap_or_else(|_| unreachable!());

    let created = create_role_handler(
        State(state.clone()),
        Json(CreateRoleRequest {
            name: "Editor".to_owned(),
            permission_ids: references("[1, 99]"),
        }),
    )
    .await;
    assert_eq!(status_of(created), StatusCode::NOT_FOUND);

    let Json(roles) = list_roles_handler(State(state.clone()))
        .await
        .unwrap_or_else(|_| unreachable!());
    let names: Vec<_> = roles.iter().map(|role| role.name.as_str()).collect();
    assert_eq!(names, vec!["Administrator"]);

    let role_id = create(&state, "Editor", references("[1]")).await;
    assert_eq!(role_id, 2);
}

#[tokio::test]
async fn update_with_unknown_permission_keeps_name_and_permissions() {
    let (state, repository) = build_state();
    for (name, display_name) in [("a", "A"), ("b", "B")] {
        repository
            .insert_permission(name, display_name)
            .await
            .unwrap_or_else(|_| unreachable!());
    }
    let role_id = create(&state, "Editor", references("[1]")).await;

    let updated = update_role_handler(
        State(state.clone()),
        Path(role_id),
        Json(UpdateRoleRequest {
            name: "Renamed".to_owned(),
            permission_ids: references("[2, 99]"),
        }),
    )
    .await;
    assert_eq!(status_of(updated), StatusCode::NOT_FOUND);

    let Json(edit) = edit_role_handler(State(state), Path(role_id))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(edit.role.name, "Editor");
    assert_eq!(edit.permission_ids, vec![1]);
}

#[test]
fn update_payload_requires_the_permission_list() {
    let name_only = serde_json::from_str::<UpdateRoleRequest>(r#"{"name": "Editor"}"#);
    let cleared = serde_json::from_str::<UpdateRoleRequest>(
        r#"{"name": "Editor", "permission_ids": []}"#,
    );

    assert!(name_only.is_err());
    assert!(cleared.is_ok_and(|payload| payload.permission_ids.is_empty()));
}
