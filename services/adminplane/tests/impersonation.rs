mod common;

use adminplane::auth::{AuthContext, start_impersonation, stop_impersonation};
use adminplane::error::WorkflowError;
use adminplane::workflows::changelog::changelog_for_user;
use common::{admin_context, plain_user, user_with_roles};
use quill_authz::UserId;

#[tokio::test]
async fn admins_switch_and_the_switch_is_recorded() {
    let (state, ctx) = admin_context().await;
    let target = plain_user(&state, "Ada", "Lovelace", "ada@example.com").await;

    let switched = start_impersonation(&state, &ctx, target.id)
        .await
        .expect("switch");
    assert!(switched.is_impersonating);
    assert_eq!(switched.user.id, target.id);
    assert_eq!(
        switched.original_user.as_ref().map(|user| user.id),
        Some(ctx.user.id)
    );
    // Changes made from here on attribute to the impersonated user.
    assert_eq!(switched.actor().actor_id(), Some(target.id.get()));

    let history = changelog_for_user(&state, &ctx, target.id)
        .await
        .expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].field, "Impersonation");
    assert_eq!(history[0].action, "impersonate");
    assert_eq!(history[0].actor, "System Admin");
    assert_eq!(history[0].actor_id, Some(ctx.user.id.get()));
    assert_eq!(history[0].old_value, "∅");
    assert_eq!(
        history[0].new_value,
        format!("Impersonated by {}", ctx.user.email)
    );
    assert_eq!(
        history[0].comment.as_deref(),
        Some("User 'System Admin' started impersonating 'Ada Lovelace'")
    );
}

#[tokio::test]
async fn self_impersonation_is_rejected() {
    let (state, ctx) = admin_context().await;
    let denied = start_impersonation(&state, &ctx, ctx.user.id).await;
    match denied {
        Err(WorkflowError::InvalidInput(message)) => {
            assert_eq!(message, "You are already this user");
        }
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[tokio::test]
async fn only_admins_may_impersonate() {
    let (state, admin) = admin_context().await;
    let outsider = plain_user(&state, "Eve", "Curious", "eve@example.com").await;
    let ctx = AuthContext::for_user(outsider);

    let denied = start_impersonation(&state, &ctx, admin.user.id).await;
    assert!(matches!(denied, Err(WorkflowError::NotAuthorized(_))));
}

#[tokio::test]
async fn missing_targets_are_not_found() {
    let (state, ctx) = admin_context().await;
    let denied = start_impersonation(&state, &ctx, UserId::new(4040)).await;
    assert!(matches!(denied, Err(WorkflowError::NotFound(_))));
}

#[tokio::test]
async fn stop_returns_to_the_first_admin_even_after_chained_switches() {
    let (state, ctx) = admin_context().await;
    let deputy = user_with_roles(&state, "deputy@example.com", &["admin"]).await;
    let grace = plain_user(&state, "Grace", "Hopper", "grace@example.com").await;

    let switched = start_impersonation(&state, &ctx, deputy.id)
        .await
        .expect("first switch");
    // The deputy holds the admin role, so the chain may continue.
    let chained = start_impersonation(&state, &switched, grace.id)
        .await
        .expect("second switch");
    assert_eq!(chained.user.id, grace.id);
    assert_eq!(
        chained.original_user.as_ref().map(|user| user.id),
        Some(ctx.user.id)
    );

    let restored = stop_impersonation(&chained).expect("stop");
    assert!(!restored.is_impersonating);
    assert_eq!(restored.user.id, ctx.user.id);
    assert!(restored.original_user.is_none());

    let idle = stop_impersonation(&restored);
    assert!(matches!(idle, Err(WorkflowError::InvalidInput(_))));
}
