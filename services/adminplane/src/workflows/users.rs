//! User administration workflows.
//!
//! # Purpose
//! Creating and editing users, and resolving the delegation scopes an
//! editing screen may offer. Every mutation is recorded: creation as a
//! scalar transition on the `User` field plus one initial diff per
//! populated relation, edits as one record per changed scalar and one
//! diff per changed relation.
use std::collections::BTreeSet;

use quill_authz::{
    AssignableSet, CountryId, GroupId, PositionId, RoleId, UserId, assignable_rights,
};
use quill_ledger::ChangeAction;
use serde::Deserialize;

use crate::app::AppState;
use crate::auth::{AuthContext, authorize, load_principal_graph};
use crate::error::{WorkflowError, WorkflowResult};
use crate::model::User;

use super::{
    resolve_country_names, resolve_group_names, resolve_position_names, resolve_role_names,
};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default = "default_status")]
    pub status: bool,
    #[serde(default)]
    pub groups: BTreeSet<GroupId>,
    #[serde(default)]
    pub roles: BTreeSet<RoleId>,
    #[serde(default)]
    pub positions: BTreeSet<PositionId>,
    #[serde(default)]
    pub countries: BTreeSet<CountryId>,
    #[serde(default)]
    pub assignable: AssignableSet,
}

fn default_status() -> bool {
    true
}

impl CreateUserRequest {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            country: None,
            status: true,
            groups: BTreeSet::new(),
            roles: BTreeSet::new(),
            positions: BTreeSet::new(),
            countries: BTreeSet::new(),
            assignable: AssignableSet::default(),
        }
    }
}

/// Edit request. Absent fields are left untouched; an empty string in
/// `country` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub status: Option<bool>,
    pub country: Option<String>,
    pub comment: Option<String>,
    pub groups: Option<BTreeSet<GroupId>>,
    pub roles: Option<BTreeSet<RoleId>>,
    pub positions: Option<BTreeSet<PositionId>>,
    pub countries: Option<BTreeSet<CountryId>>,
    pub assignable_groups: Option<BTreeSet<GroupId>>,
    pub assignable_roles: Option<BTreeSet<RoleId>>,
    pub assignable_positions: Option<BTreeSet<PositionId>>,
    pub assignable_countries: Option<BTreeSet<CountryId>>,
}

/// Creates a user and records the creation.
///
/// Requires `admin` or `route:users#create`.
pub async fn create_user(
    state: &AppState,
    ctx: &AuthContext,
    request: CreateUserRequest,
) -> WorkflowResult<User> {
    authorize(state.store.as_ref(), ctx, &["route:users#create"]).await?;
    let store = state.store.as_ref();

    if request.email.trim().is_empty() {
        return Err(WorkflowError::InvalidInput(
            "email must not be empty".to_string(),
        ));
    }
    if store.find_user_by_email(&request.email).await?.is_some() {
        return Err(WorkflowError::Conflict(format!(
            "user with email {} already exists",
            request.email
        )));
    }

    // Resolving names up front also validates every relation id.
    let group_names = resolve_group_names(store, &request.groups).await?;
    let role_names = resolve_role_names(store, &request.roles).await?;
    let position_names = resolve_position_names(store, &request.positions).await?;
    let country_names = resolve_country_names(store, &request.countries).await?;
    let assignable_group_names = resolve_group_names(store, &request.assignable.groups).await?;
    let assignable_role_names = resolve_role_names(store, &request.assignable.roles).await?;
    let assignable_position_names =
        resolve_position_names(store, &request.assignable.positions).await?;
    let assignable_country_names =
        resolve_country_names(store, &request.assignable.countries).await?;

    let mut user = User::new(&request.first_name, &request.last_name, &request.email);
    user.status = request.status;
    user.country = request.country.clone();
    user.groups = request.groups;
    user.roles = request.roles;
    user.positions = request.positions;
    user.countries = request.countries;
    user.assignable = request.assignable;
    let user = store.create_user(user).await?;

    let actor = ctx.actor();
    state
        .ledger
        .record_scalar(
            &actor,
            "User",
            user.id.get(),
            "User",
            None,
            Some(&user.email),
            ChangeAction::Created,
            Some(&format!(
                "User {} {} created",
                user.first_name, user.last_name
            )),
        )
        .await?;

    let empty = BTreeSet::new();
    for (label, names) in [
        ("User Groups", &group_names),
        ("User Roles", &role_names),
        ("User Positions", &position_names),
        ("User Countries", &country_names),
        ("Assignable Groups", &assignable_group_names),
        ("Assignable Roles", &assignable_role_names),
        ("Assignable Positions", &assignable_position_names),
        ("Assignable Countries", &assignable_country_names),
    ] {
        state
            .ledger
            .record_list_diff(
                &actor,
                "User",
                user.id.get(),
                label,
                &empty,
                names,
                Some(&format!("Initial {label} assignment")),
            )
            .await?;
    }

    tracing::info!(user = %user.email, by = %ctx.user.email, "user created");
    Ok(user)
}

/// Applies an edit and records every transition.
///
/// Requires `admin` or `route:users#edit`. Scalars record before
/// relations; relations keep a fixed order so history reads uniformly.
pub async fn update_user(
    state: &AppState,
    ctx: &AuthContext,
    user_id: UserId,
    request: UpdateUserRequest,
) -> WorkflowResult<User> {
    authorize(state.store.as_ref(), ctx, &["route:users#edit"]).await?;
    let store = state.store.as_ref();
    let before = store.get_user(user_id).await?;
    let mut after = before.clone();

    let mut scalar_changes: Vec<(&'static str, Option<String>, Option<String>)> = Vec::new();

    if let Some(value) = &request.first_name {
        if *value != before.first_name {
            scalar_changes.push((
                "First Name",
                Some(before.first_name.clone()),
                Some(value.clone()),
            ));
            after.first_name = value.clone();
        }
    }
    if let Some(value) = &request.last_name {
        if *value != before.last_name {
            scalar_changes.push((
                "Last Name",
                Some(before.last_name.clone()),
                Some(value.clone()),
            ));
            after.last_name = value.clone();
        }
    }
    if let Some(value) = &request.email {
        if *value != before.email {
            scalar_changes.push(("Email", Some(before.email.clone()), Some(value.clone())));
            after.email = value.clone();
        }
    }
    if let Some(value) = request.status {
        if value != before.status {
            scalar_changes.push((
                "Status",
                Some(before.status.to_string()),
                Some(value.to_string()),
            ));
            after.status = value;
        }
    }
    if let Some(value) = &request.country {
        let next = if value.is_empty() {
            None
        } else {
            Some(value.clone())
        };
        if next != before.country {
            scalar_changes.push(("Country", before.country.clone(), next.clone()));
            after.country = next;
        }
    }

    let mut list_changes: Vec<(&'static str, BTreeSet<String>, BTreeSet<String>)> = Vec::new();

    if let Some(ids) = &request.groups {
        if *ids != before.groups {
            let old = resolve_group_names(store, &before.groups).await?;
            let new = resolve_group_names(store, ids).await?;
            list_changes.push(("User Groups", old, new));
            after.groups = ids.clone();
        }
    }
    if let Some(ids) = &request.roles {
        if *ids != before.roles {
            let old = resolve_role_names(store, &before.roles).await?;
            let new = resolve_role_names(store, ids).await?;
            list_changes.push(("User Roles", old, new));
            after.roles = ids.clone();
        }
    }
    if let Some(ids) = &request.positions {
        if *ids != before.positions {
            let old = resolve_position_names(store, &before.positions).await?;
            let new = resolve_position_names(store, ids).await?;
            list_changes.push(("User Positions", old, new));
            after.positions = ids.clone();
        }
    }
    if let Some(ids) = &request.countries {
        if *ids != before.countries {
            let old = resolve_country_names(store, &before.countries).await?;
            let new = resolve_country_names(store, ids).await?;
            list_changes.push(("User Countries", old, new));
            after.countries = ids.clone();
        }
    }
    if let Some(ids) = &request.assignable_groups {
        if *ids != before.assignable.groups {
            let old = resolve_group_names(store, &before.assignable.groups).await?;
            let new = resolve_group_names(store, ids).await?;
            list_changes.push(("Assignable Groups", old, new));
            after.assignable.groups = ids.clone();
        }
    }
    if let Some(ids) = &request.assignable_roles {
        if *ids != before.assignable.roles {
            let old = resolve_role_names(store, &before.assignable.roles).await?;
            let new = resolve_role_names(store, ids).await?;
            list_changes.push(("Assignable Roles", old, new));
            after.assignable.roles = ids.clone();
        }
    }
    if let Some(ids) = &request.assignable_positions {
        if *ids != before.assignable.positions {
            let old = resolve_position_names(store, &before.assignable.positions).await?;
            let new = resolve_position_names(store, ids).await?;
            list_changes.push(("Assignable Positions", old, new));
            after.assignable.positions = ids.clone();
        }
    }
    if let Some(ids) = &request.assignable_countries {
        if *ids != before.assignable.countries {
            let old = resolve_country_names(store, &before.assignable.countries).await?;
            let new = resolve_country_names(store, ids).await?;
            list_changes.push(("Assignable Countries", old, new));
            after.assignable.countries = ids.clone();
        }
    }

    if scalar_changes.is_empty() && list_changes.is_empty() {
        return Ok(before);
    }

    let after = store.update_user(after).await?;
    let actor = ctx.actor();
    let comment = request.comment.as_deref();
    for (label, old, new) in &scalar_changes {
        state
            .ledger
            .record_scalar(
                &actor,
                "User",
                after.id.get(),
                label,
                old.as_deref(),
                new.as_deref(),
                ChangeAction::Updated,
                comment,
            )
            .await?;
    }
    for (label, old, new) in &list_changes {
        state
            .ledger
            .record_list_diff(&actor, "User", after.id.get(), label, old, new, comment)
            .await?;
    }

    tracing::info!(user = %after.email, by = %ctx.user.email, "user updated");
    Ok(after)
}

/// Resolves the delegation scopes an editing screen should offer for
/// `target_id`.
///
/// Requires `admin` or `route:users#view`. An admin viewing their own
/// record sees everything in the directory.
pub async fn resolve_assignables(
    state: &AppState,
    ctx: &AuthContext,
    target_id: UserId,
) -> WorkflowResult<AssignableSet> {
    authorize(state.store.as_ref(), ctx, &["route:users#view"]).await?;
    let store = state.store.as_ref();
    let target = store.get_user(target_id).await?;
    let caller_graph = load_principal_graph(store, &ctx.user).await?;
    let is_self = ctx.user.id == target.id;

    let universe = AssignableSet {
        groups: store
            .list_groups()
            .await?
            .into_iter()
            .map(|group| group.id)
            .collect(),
        positions: store
            .list_positions()
            .await?
            .into_iter()
            .map(|position| position.id)
            .collect(),
        roles: store
            .list_roles()
            .await?
            .into_iter()
            .map(|role| role.id)
            .collect(),
        countries: store
            .list_countries()
            .await?
            .into_iter()
            .map(|country| country.id)
            .collect(),
    };
    Ok(assignable_rights(
        &caller_graph,
        &target.assignable,
        is_self,
        &universe,
    ))
}
