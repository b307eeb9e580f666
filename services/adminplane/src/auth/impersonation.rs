//! Admin impersonation sessions.
//!
//! # Purpose
//! Lets an administrator act as another user. The switch itself is
//! recorded against the target and attributed to the admin; everything
//! done afterwards attributes to the impersonated user.
use quill_authz::{ADMIN_ROLE, UserId};
use quill_ledger::ChangeAction;

use crate::app::AppState;
use crate::auth::{AuthContext, authorize};
use crate::error::{WorkflowError, WorkflowResult};

/// Switches the context to act as `target_id`. Admin only.
pub async fn start_impersonation(
    state: &AppState,
    ctx: &AuthContext,
    target_id: UserId,
) -> WorkflowResult<AuthContext> {
    authorize(state.store.as_ref(), ctx, &[ADMIN_ROLE]).await?;
    let target = state.store.get_user(target_id).await?;
    if target.id == ctx.user.id {
        return Err(WorkflowError::InvalidInput(
            "You are already this user".to_string(),
        ));
    }

    let admin = &ctx.user;
    state
        .ledger
        .record_scalar(
            &ctx.actor(),
            "User",
            target.id.get(),
            "Impersonation",
            None,
            Some(&format!("Impersonated by {}", admin.email)),
            ChangeAction::Custom("impersonate".to_string()),
            Some(&format!(
                "User '{}' started impersonating '{}'",
                admin.full_name(),
                target.full_name()
            )),
        )
        .await?;
    tracing::info!(admin = %admin.email, target = %target.email, "impersonation started");

    // A chained switch keeps the first admin as the return point.
    let original = ctx.original_user.clone().unwrap_or_else(|| admin.clone());
    Ok(AuthContext {
        user: target,
        original_user: Some(original),
        is_impersonating: true,
    })
}

/// Returns to the admin who started the session. Writes no record.
pub fn stop_impersonation(ctx: &AuthContext) -> WorkflowResult<AuthContext> {
    if !ctx.is_impersonating {
        return Err(WorkflowError::InvalidInput(
            "no impersonation in progress".to_string(),
        ));
    }
    match ctx.original_user.clone() {
        Some(original) => Ok(AuthContext::for_user(original)),
        None => Err(WorkflowError::InvalidInput(
            "no impersonation in progress".to_string(),
        )),
    }
}
