//! Position-driven group reconciliation.
//!
//! # Purpose
//! One pass realigns every user's group memberships with what their
//! positions confer, keeping held memberships in excluded groups. Each
//! changed user gets a membership diff plus one `matrix_sync` summary
//! record, both attributed to the system actor.
//!
//! # Notes
//! Scheduling is external; callers decide when a pass runs. Status and
//! log views read the ledger and perform no permission check of their
//! own.
use chrono::{DateTime, Utc};
use quill_ledger::{Actor, ChangeAction, display_set};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::load_principal_graph;
use crate::error::WorkflowResult;
use crate::workflows::changelog::ChangeLogEntryView;
use quill_authz::plan_matrix_sync;

use super::resolve_group_names;

/// Stored action label for sync records.
pub const MATRIX_SYNC_ACTION: &str = "matrix_sync";

const MATRIX_LOG_LIMIT: usize = 100;

fn sync_action() -> ChangeAction {
    ChangeAction::Custom(MATRIX_SYNC_ACTION.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixSyncOutcome {
    pub updated_users: usize,
    pub records_written: usize,
    pub dry_run: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixSyncStatus {
    pub total_syncs: u64,
    pub last_synced_at: Option<DateTime<Utc>>,
}

/// Runs one reconciliation pass over every user.
///
/// With `dry_run` set, decisions are computed and counted but nothing
/// is persisted or recorded.
pub async fn run_matrix_sync(state: &AppState, dry_run: bool) -> WorkflowResult<MatrixSyncOutcome> {
    let store = state.store.as_ref();
    let actor = Actor::System;
    let mut updated_users = 0usize;
    let mut records_written = 0usize;

    for user in store.list_users().await? {
        let graph = load_principal_graph(store, &user).await?;
        let Some(plan) = plan_matrix_sync(&graph) else {
            continue;
        };

        let old_names = resolve_group_names(store, &user.groups).await?;
        let new_names = resolve_group_names(store, &plan.final_groups).await?;
        updated_users += 1;

        if dry_run {
            tracing::info!(
                user = %user.email,
                added = plan.added.len(),
                removed = plan.removed.len(),
                "matrix sync dry run, not applying"
            );
            continue;
        }

        let mut synced = user.clone();
        synced.groups = plan.final_groups.clone();
        let synced = store.update_user(synced).await?;

        let diff_records = state
            .ledger
            .record_list_diff(
                &actor,
                "User",
                synced.id.get(),
                "Groups (Matrix Sync)",
                &old_names,
                &new_names,
                Some(&format!(
                    "Matrix sync updated groups for {} {}",
                    synced.first_name, synced.last_name
                )),
            )
            .await?;
        state
            .ledger
            .record_scalar(
                &actor,
                "User",
                synced.id.get(),
                "Matrix Sync",
                Some(&display_set(&old_names)),
                Some(&display_set(&new_names)),
                sync_action(),
                Some(&format!(
                    "SYSTEM auto-synced groups for {} {}",
                    synced.first_name, synced.last_name
                )),
            )
            .await?;
        records_written += diff_records.len() + 1;
        tracing::info!(
            user = %synced.email,
            added = plan.added.len(),
            removed = plan.removed.len(),
            retained = plan.retained.len(),
            "matrix sync applied"
        );
    }

    let message = format!("Matrix synchronization complete. {updated_users} user(s) updated.");
    tracing::info!(
        updated = updated_users,
        records = records_written,
        dry_run,
        "matrix sync pass finished"
    );
    Ok(MatrixSyncOutcome {
        updated_users,
        records_written,
        dry_run,
        message,
    })
}

/// How many syncs have run and when the last one touched a user.
pub async fn matrix_sync_status(state: &AppState) -> WorkflowResult<MatrixSyncStatus> {
    let action = sync_action();
    let total_syncs = state.ledger.store().count_action(&action).await?;
    let last_synced_at = state
        .ledger
        .store()
        .by_action(&action, 1)
        .await?
        .first()
        .map(|record| record.recorded_at);
    Ok(MatrixSyncStatus {
        total_syncs,
        last_synced_at,
    })
}

/// The most recent sync summary records, newest first.
pub async fn matrix_sync_log(state: &AppState) -> WorkflowResult<Vec<ChangeLogEntryView>> {
    let records = state
        .ledger
        .store()
        .by_action(&sync_action(), MATRIX_LOG_LIMIT)
        .await?;
    super::changelog::render_views(state, records).await
}
