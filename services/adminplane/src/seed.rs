//! First-run directory seeding.
//!
//! # Purpose
//! Ensures the role catalog, the `admin` and `basic` groups, the
//! `Super Admin` position, and the administrator account exist. Safe to
//! run on every startup: existing objects are left alone and the admin
//! account is backfilled with any grant it is missing.
//!
//! # Notes
//! Seeding runs before any authenticated context exists, so it reports
//! through tracing instead of writing ledger records.
use std::collections::BTreeSet;

use anyhow::{Context, Result};
use quill_authz::{GroupId, RoleId};

use crate::app::AppState;
use crate::config::AdminPlaneConfig;
use crate::model::{Group, Position, Role, User};
use crate::store::DirectoryStore;

pub const ADMIN_GROUP: &str = "admin";
pub const BASIC_GROUP: &str = "basic";
pub const SUPER_ADMIN_POSITION: &str = "Super Admin";

/// Role labels the backend's own guards reference, plus the page roles
/// every deployment starts with.
const REQUIRED_ROLES: &[(&str, &str)] = &[
    ("admin", "Full administrative access"),
    ("route:about", "View the about page"),
    ("route:profile", "View and edit own profile"),
    ("route:users#view", "View users"),
    ("route:users#create", "Create users"),
    ("route:users#edit", "Edit users"),
    ("route:users#view-changelog", "View change history"),
    ("route:groups#view", "View user groups"),
    ("route:groups#create", "Create user groups"),
    ("route:groups#edit", "Edit user groups"),
    ("route:roles#view", "View roles"),
    ("route:positions#view", "View positions"),
    ("route:positions#edit", "Edit positions"),
    ("route:countries#view", "View countries"),
    ("route:admin-actions#delete-groups", "Delete user groups"),
    ("route:system#matrix-sync", "Trigger the matrix sync"),
];

/// Creates anything missing and returns the administrator account.
pub async fn ensure_seed_data(state: &AppState, config: &AdminPlaneConfig) -> Result<User> {
    let store = state.store.as_ref();

    let mut role_ids: BTreeSet<RoleId> = BTreeSet::new();
    let mut admin_role = None;
    let mut basic_roles: BTreeSet<RoleId> = BTreeSet::new();
    for (name, description) in REQUIRED_ROLES {
        let role = ensure_role(store, name, description).await?;
        if role.name == "admin" {
            admin_role = Some(role.id);
        }
        if role.name == "route:about" || role.name == "route:profile" {
            basic_roles.insert(role.id);
        }
        role_ids.insert(role.id);
    }
    let admin_role = admin_role.context("admin role missing after seeding")?;

    let admin_roles: BTreeSet<RoleId> = [admin_role].into_iter().collect();
    let admin_group =
        ensure_group(store, ADMIN_GROUP, "Full SuperAdmin access.", false, &admin_roles).await?;
    // Excluded from the matrix so baseline access survives sync passes.
    let basic_group = ensure_group(
        store,
        BASIC_GROUP,
        "Basic user authentication access.",
        true,
        &basic_roles,
    )
    .await?;

    let admin_groups: BTreeSet<GroupId> = [admin_group.id].into_iter().collect();
    let super_admin = ensure_position(store, SUPER_ADMIN_POSITION, &admin_groups).await?;

    let admin_user = match store.find_user_by_email(&config.admin_email).await? {
        Some(user) => user,
        None => {
            let mut user = User::new("System", "Admin", &config.admin_email);
            user.country = Some(config.admin_country.clone());
            let user = store.create_user(user).await?;
            tracing::info!(email = %user.email, "seeded administrator account");
            user
        }
    };

    // Backfill grants the account is missing; a no-op on reruns.
    let mut backfilled = admin_user.clone();
    backfilled.groups.insert(admin_group.id);
    backfilled.groups.insert(basic_group.id);
    backfilled.positions.insert(super_admin.id);
    backfilled.roles.extend(role_ids.iter().copied());
    if backfilled != admin_user {
        let updated = store.update_user(backfilled).await?;
        tracing::info!(email = %updated.email, "backfilled administrator grants");
        return Ok(updated);
    }
    Ok(admin_user)
}

async fn ensure_role(store: &dyn DirectoryStore, name: &str, description: &str) -> Result<Role> {
    if let Some(existing) = store.find_role_by_name(name).await? {
        return Ok(existing);
    }
    let role = store.create_role(Role::new(name, description)).await?;
    tracing::info!(role = %role.name, "seeded role");
    Ok(role)
}

async fn ensure_group(
    store: &dyn DirectoryStore,
    name: &str,
    description: &str,
    exclude_from_matrix: bool,
    roles: &BTreeSet<RoleId>,
) -> Result<Group> {
    if let Some(existing) = store.find_group_by_name(name).await? {
        if !roles.is_subset(&existing.roles) {
            let mut updated = existing.clone();
            updated.roles.extend(roles.iter().copied());
            let updated = store.update_group(updated).await?;
            tracing::info!(group = %updated.name, "backfilled group roles");
            return Ok(updated);
        }
        return Ok(existing);
    }
    let mut group = Group::new(name);
    group.description = Some(description.to_string());
    group.exclude_from_matrix = exclude_from_matrix;
    group.roles = roles.clone();
    let group = store.create_group(group).await?;
    tracing::info!(group = %group.name, "seeded group");
    Ok(group)
}

async fn ensure_position(
    store: &dyn DirectoryStore,
    name: &str,
    groups: &BTreeSet<GroupId>,
) -> Result<Position> {
    if let Some(existing) = store.find_position_by_name(name).await? {
        if !groups.is_subset(&existing.groups) {
            let mut updated = existing.clone();
            updated.groups.extend(groups.iter().copied());
            let updated = store.update_position(updated).await?;
            tracing::info!(position = %updated.name, "backfilled position groups");
            return Ok(updated);
        }
        return Ok(existing);
    }
    let mut position = Position::new(name);
    position.groups = groups.clone();
    let position = store.create_position(position).await?;
    tracing::info!(position = %position.name, "seeded position");
    Ok(position)
}
