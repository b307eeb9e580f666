//! Change history views.
//!
//! # Purpose
//! Read-only projections of the ledger with actor and object names
//! resolved for display. Access requires `admin` or
//! `route:users#view-changelog`.
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use quill_authz::UserId;
use quill_ledger::ChangeRecord;
use serde::Serialize;

use crate::app::AppState;
use crate::auth::{AuthContext, authorize};
use crate::error::WorkflowResult;

/// Upper bound on the unfiltered recent view.
pub const CHANGELOG_VIEW_LIMIT: usize = 100;

/// One ledger record rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeLogEntryView {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    /// `SYSTEM` or the acting user's full name.
    pub actor: String,
    pub actor_id: Option<i64>,
    pub object_type: String,
    pub object_id: i64,
    /// Resolved for `User` targets, absent otherwise.
    pub object_name: Option<String>,
    pub field: String,
    pub action: String,
    pub old_value: String,
    pub new_value: String,
    pub comment: Option<String>,
}

async fn require_changelog_access(state: &AppState, ctx: &AuthContext) -> WorkflowResult<()> {
    authorize(state.store.as_ref(), ctx, &["route:users#view-changelog"]).await
}

pub(crate) async fn render_views(
    state: &AppState,
    records: Vec<ChangeRecord>,
) -> WorkflowResult<Vec<ChangeLogEntryView>> {
    let users = state.store.list_users().await?;
    let names: HashMap<i64, String> = users
        .iter()
        .map(|user| (user.id.get(), user.full_name()))
        .collect();

    Ok(records
        .into_iter()
        .map(|record| {
            let actor = match record.actor {
                Some(id) => names
                    .get(&id)
                    .cloned()
                    .unwrap_or_else(|| "SYSTEM".to_string()),
                None => "SYSTEM".to_string(),
            };
            let object_name = if record.object_type == "User" {
                names.get(&record.object_id).cloned()
            } else {
                None
            };
            ChangeLogEntryView {
                id: record.seq,
                timestamp: record.recorded_at,
                actor,
                actor_id: record.actor,
                object_type: record.object_type,
                object_id: record.object_id,
                object_name,
                field: record.field,
                action: record.action.to_string(),
                old_value: record.old_value,
                new_value: record.new_value,
                comment: record.comment,
            }
        })
        .collect())
}

/// Every record touching one user, newest first.
pub async fn changelog_for_user(
    state: &AppState,
    ctx: &AuthContext,
    user_id: UserId,
) -> WorkflowResult<Vec<ChangeLogEntryView>> {
    require_changelog_access(state, ctx).await?;
    let records = state
        .ledger
        .store()
        .for_object("User", user_id.get())
        .await?;
    render_views(state, records).await
}

/// Every record written by one actor, newest first.
pub async fn changelog_by_actor(
    state: &AppState,
    ctx: &AuthContext,
    actor_id: UserId,
) -> WorkflowResult<Vec<ChangeLogEntryView>> {
    require_changelog_access(state, ctx).await?;
    let records = state.ledger.store().by_actor(actor_id.get()).await?;
    render_views(state, records).await
}

/// The most recent records across the directory, optionally filtered by
/// object type, capped at [`CHANGELOG_VIEW_LIMIT`].
pub async fn recent_changelog(
    state: &AppState,
    ctx: &AuthContext,
    object_type: Option<&str>,
) -> WorkflowResult<Vec<ChangeLogEntryView>> {
    require_changelog_access(state, ctx).await?;
    let records = state
        .ledger
        .store()
        .recent(object_type, CHANGELOG_VIEW_LIMIT)
        .await?;
    render_views(state, records).await
}
