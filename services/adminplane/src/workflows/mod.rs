//! Guarded operations over the directory and the change ledger.
//!
//! # Purpose
//! Each operation authorizes the caller, mutates the directory, and then
//! records what changed. A failed ledger write fails the operation.
//!
//! # Notes
//! Relation diffs are recorded as display names, not ids, so resolution
//! helpers here double as validation: an unknown id is a not-found
//! error before anything is written.
pub mod changelog;
pub mod groups;
pub mod matrix;
pub mod users;

use std::collections::{BTreeSet, HashMap};

use quill_authz::{CountryId, GroupId, PositionId, RoleId};

use crate::error::{WorkflowError, WorkflowResult};
use crate::store::DirectoryStore;

pub(crate) async fn resolve_group_names(
    store: &dyn DirectoryStore,
    ids: &BTreeSet<GroupId>,
) -> WorkflowResult<BTreeSet<String>> {
    let groups = store.list_groups().await?;
    let index: HashMap<GroupId, &str> = groups
        .iter()
        .map(|group| (group.id, group.name.as_str()))
        .collect();
    let mut names = BTreeSet::new();
    for id in ids {
        match index.get(id) {
            Some(name) => {
                names.insert((*name).to_string());
            }
            None => return Err(WorkflowError::NotFound(format!("group {id}"))),
        }
    }
    Ok(names)
}

pub(crate) async fn resolve_role_names(
    store: &dyn DirectoryStore,
    ids: &BTreeSet<RoleId>,
) -> WorkflowResult<BTreeSet<String>> {
    let roles = store.list_roles().await?;
    let index: HashMap<RoleId, &str> = roles
        .iter()
        .map(|role| (role.id, role.name.as_str()))
        .collect();
    let mut names = BTreeSet::new();
    for id in ids {
        match index.get(id) {
            Some(name) => {
                names.insert((*name).to_string());
            }
            None => return Err(WorkflowError::NotFound(format!("role {id}"))),
        }
    }
    Ok(names)
}

pub(crate) async fn resolve_position_names(
    store: &dyn DirectoryStore,
    ids: &BTreeSet<PositionId>,
) -> WorkflowResult<BTreeSet<String>> {
    let positions = store.list_positions().await?;
    let index: HashMap<PositionId, &str> = positions
        .iter()
        .map(|position| (position.id, position.name.as_str()))
        .collect();
    let mut names = BTreeSet::new();
    for id in ids {
        match index.get(id) {
            Some(name) => {
                names.insert((*name).to_string());
            }
            None => return Err(WorkflowError::NotFound(format!("position {id}"))),
        }
    }
    Ok(names)
}

pub(crate) async fn resolve_country_names(
    store: &dyn DirectoryStore,
    ids: &BTreeSet<CountryId>,
) -> WorkflowResult<BTreeSet<String>> {
    let countries = store.list_countries().await?;
    let index: HashMap<CountryId, &str> = countries
        .iter()
        .map(|country| (country.id, country.name.as_str()))
        .collect();
    let mut names = BTreeSet::new();
    for id in ids {
        match index.get(id) {
            Some(name) => {
                names.insert((*name).to_string());
            }
            None => return Err(WorkflowError::NotFound(format!("country {id}"))),
        }
    }
    Ok(names)
}
