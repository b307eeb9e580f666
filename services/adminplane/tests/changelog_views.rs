mod common;

use adminplane::auth::AuthContext;
use adminplane::error::WorkflowError;
use adminplane::workflows::changelog::{changelog_by_actor, changelog_for_user, recent_changelog};
use adminplane::workflows::groups::{CreateGroupRequest, create_group};
use adminplane::workflows::users::{CreateUserRequest, UpdateUserRequest, create_user, update_user};
use common::{admin_context, plain_user, user_with_roles};

#[tokio::test]
async fn views_require_the_changelog_role() {
    let (state, admin) = admin_context().await;

    let outsider = plain_user(&state, "Eve", "Curious", "eve@example.com").await;
    let ctx = AuthContext::for_user(outsider);
    let denied = changelog_for_user(&state, &ctx, admin.user.id).await;
    assert!(matches!(denied, Err(WorkflowError::NotAuthorized(_))));
    let denied = changelog_by_actor(&state, &ctx, admin.user.id).await;
    assert!(matches!(denied, Err(WorkflowError::NotAuthorized(_))));
    let denied = recent_changelog(&state, &ctx, None).await;
    assert!(matches!(denied, Err(WorkflowError::NotAuthorized(_))));

    let auditor =
        user_with_roles(&state, "auditor@example.com", &["route:users#view-changelog"]).await;
    let ctx = AuthContext::for_user(auditor);
    changelog_for_user(&state, &ctx, admin.user.id)
        .await
        .expect("auditor may read");
    recent_changelog(&state, &ctx, None)
        .await
        .expect("auditor may read");
}

#[tokio::test]
async fn histories_read_newest_first_with_actors_resolved() {
    let (state, ctx) = admin_context().await;
    let user = create_user(
        &state,
        &ctx,
        CreateUserRequest::new("Ada", "Lovelace", "ada@example.com"),
    )
    .await
    .expect("create");
    update_user(
        &state,
        &ctx,
        user.id,
        UpdateUserRequest {
            email: Some("ada@analytical.example".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("update");

    let history = changelog_for_user(&state, &ctx, user.id)
        .await
        .expect("history");
    assert_eq!(history.len(), 2);
    assert!(history[0].id > history[1].id);
    assert!(history[0].timestamp >= history[1].timestamp);
    assert!(history.iter().all(|entry| entry.actor == "System Admin"));
    assert!(
        history
            .iter()
            .all(|entry| entry.actor_id == Some(ctx.user.id.get()))
    );
    assert_eq!(history[0].object_name.as_deref(), Some("Ada Lovelace"));

    let by_admin = changelog_by_actor(&state, &ctx, ctx.user.id)
        .await
        .expect("by actor");
    assert_eq!(by_admin.len(), 2);
}

#[tokio::test]
async fn recent_view_filters_by_object_type() {
    let (state, ctx) = admin_context().await;
    create_group(&state, &ctx, CreateGroupRequest::new("support"))
        .await
        .expect("create group");
    create_user(
        &state,
        &ctx,
        CreateUserRequest::new("Ada", "Lovelace", "ada@example.com"),
    )
    .await
    .expect("create user");

    let all = recent_changelog(&state, &ctx, None).await.expect("recent");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].object_type, "User");
    assert_eq!(all[1].object_type, "Group");

    let groups_only = recent_changelog(&state, &ctx, Some("Group"))
        .await
        .expect("recent");
    assert_eq!(groups_only.len(), 1);
    assert_eq!(groups_only[0].new_value, "support");

    let users_only = recent_changelog(&state, &ctx, Some("User"))
        .await
        .expect("recent");
    assert_eq!(users_only.len(), 1);
    assert_eq!(users_only[0].new_value, "ada@example.com");
}
