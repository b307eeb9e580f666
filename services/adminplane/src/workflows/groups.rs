//! Group administration workflows.
use std::collections::BTreeSet;

use quill_authz::{GroupId, RoleId};
use quill_ledger::ChangeAction;
use serde::Deserialize;

use crate::app::AppState;
use crate::auth::{AuthContext, authorize};
use crate::error::{WorkflowError, WorkflowResult};
use crate::model::Group;

use super::resolve_role_names;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub exclude_from_matrix: bool,
    #[serde(default)]
    pub roles: BTreeSet<RoleId>,
}

fn default_enabled() -> bool {
    true
}

impl CreateGroupRequest {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            enabled: true,
            exclude_from_matrix: false,
            roles: BTreeSet::new(),
        }
    }
}

/// Edit request. Absent fields are left untouched; an empty string in
/// `description` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub exclude_from_matrix: Option<bool>,
    pub roles: Option<BTreeSet<RoleId>>,
    pub comment: Option<String>,
}

/// Creates a group and records the creation.
///
/// Requires `admin` or `route:groups#create`.
pub async fn create_group(
    state: &AppState,
    ctx: &AuthContext,
    request: CreateGroupRequest,
) -> WorkflowResult<Group> {
    authorize(state.store.as_ref(), ctx, &["route:groups#create"]).await?;
    let store = state.store.as_ref();

    if request.name.trim().is_empty() {
        return Err(WorkflowError::InvalidInput(
            "group name must not be empty".to_string(),
        ));
    }
    if store.find_group_by_name(&request.name).await?.is_some() {
        return Err(WorkflowError::Conflict(format!(
            "group {} already exists",
            request.name
        )));
    }
    let role_names = resolve_role_names(store, &request.roles).await?;

    let mut group = Group::new(&request.name);
    group.description = request.description.clone();
    group.enabled = request.enabled;
    group.exclude_from_matrix = request.exclude_from_matrix;
    group.roles = request.roles;
    let group = store.create_group(group).await?;

    let actor = ctx.actor();
    state
        .ledger
        .record_scalar(
            &actor,
            "Group",
            group.id.get(),
            "Name",
            None,
            Some(&group.name),
            ChangeAction::Created,
            Some(&format!("Group '{}' created", group.name)),
        )
        .await?;
    state
        .ledger
        .record_list_diff(
            &actor,
            "Group",
            group.id.get(),
            "Roles",
            &BTreeSet::new(),
            &role_names,
            Some("Initial role assignment"),
        )
        .await?;

    tracing::info!(group = %group.name, by = %ctx.user.email, "group created");
    Ok(group)
}

/// Applies an edit and records every transition.
///
/// Requires `admin` or `route:groups#edit`.
pub async fn update_group(
    state: &AppState,
    ctx: &AuthContext,
    group_id: GroupId,
    request: UpdateGroupRequest,
) -> WorkflowResult<Group> {
    authorize(state.store.as_ref(), ctx, &["route:groups#edit"]).await?;
    let store = state.store.as_ref();
    let before = store.get_group(group_id).await?;
    let mut after = before.clone();

    let mut scalar_changes: Vec<(&'static str, Option<String>, Option<String>)> = Vec::new();

    if let Some(value) = &request.name {
        if *value != before.name {
            scalar_changes.push(("Name", Some(before.name.clone()), Some(value.clone())));
            after.name = value.clone();
        }
    }
    if let Some(value) = &request.description {
        let next = if value.is_empty() {
            None
        } else {
            Some(value.clone())
        };
        if next != before.description {
            scalar_changes.push(("Description", before.description.clone(), next.clone()));
            after.description = next;
        }
    }
    if let Some(value) = request.enabled {
        if value != before.enabled {
            scalar_changes.push((
                "Enabled",
                Some(before.enabled.to_string()),
                Some(value.to_string()),
            ));
            after.enabled = value;
        }
    }
    if let Some(value) = request.exclude_from_matrix {
        if value != before.exclude_from_matrix {
            scalar_changes.push((
                "Exclude From Matrix",
                Some(before.exclude_from_matrix.to_string()),
                Some(value.to_string()),
            ));
            after.exclude_from_matrix = value;
        }
    }

    let mut roles_change: Option<(BTreeSet<String>, BTreeSet<String>)> = None;
    if let Some(ids) = &request.roles {
        if *ids != before.roles {
            let old = resolve_role_names(store, &before.roles).await?;
            let new = resolve_role_names(store, ids).await?;
            roles_change = Some((old, new));
            after.roles = ids.clone();
        }
    }

    if scalar_changes.is_empty() && roles_change.is_none() {
        return Ok(before);
    }

    let after = store.update_group(after).await?;
    let actor = ctx.actor();
    let comment = request.comment.as_deref();
    for (label, old, new) in &scalar_changes {
        state
            .ledger
            .record_scalar(
                &actor,
                "Group",
                after.id.get(),
                label,
                old.as_deref(),
                new.as_deref(),
                ChangeAction::Updated,
                comment,
            )
            .await?;
    }
    if let Some((old, new)) = &roles_change {
        state
            .ledger
            .record_list_diff(&actor, "Group", after.id.get(), "Roles", old, new, comment)
            .await?;
    }

    tracing::info!(group = %after.name, by = %ctx.user.email, "group updated");
    Ok(after)
}

/// Deletes a group, scrubbing memberships, and records the deletion.
///
/// Requires `admin` or `route:admin-actions#delete-groups`.
pub async fn delete_group(
    state: &AppState,
    ctx: &AuthContext,
    group_id: GroupId,
) -> WorkflowResult<Group> {
    authorize(state.store.as_ref(), ctx, &["route:admin-actions#delete-groups"]).await?;
    let deleted = state.store.delete_group(group_id).await?;

    state
        .ledger
        .record_scalar(
            &ctx.actor(),
            "Group",
            deleted.id.get(),
            "Name",
            Some(&deleted.name),
            None,
            ChangeAction::Deleted,
            Some(&format!("Group '{}' deleted", deleted.name)),
        )
        .await?;

    tracing::info!(group = %deleted.name, by = %ctx.user.email, "group deleted");
    Ok(deleted)
}
