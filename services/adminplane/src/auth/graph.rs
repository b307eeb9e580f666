//! Grant graph loading.
//!
//! # Purpose
//! Snapshots one user's grants out of the directory into the pure,
//! id-indexed graph that role resolution and matrix planning consume.
use std::collections::HashMap;

use quill_authz::{GroupGrant, PositionGrant, PrincipalGraph, RoleId};

use crate::model::User;
use crate::store::{DirectoryStore, StoreResult};

/// Loads the grant graph for `user`.
///
/// The group index covers every group in the directory, so downstream
/// decisions see exclusion flags for groups the user does not hold yet.
/// Dangling relation ids contribute nothing.
pub async fn load_principal_graph(
    store: &dyn DirectoryStore,
    user: &User,
) -> StoreResult<PrincipalGraph> {
    let roles = store.list_roles().await?;
    let groups = store.list_groups().await?;
    let positions = store.list_positions().await?;

    let role_names: HashMap<RoleId, &str> = roles
        .iter()
        .map(|role| (role.id, role.name.as_str()))
        .collect();

    let mut graph = PrincipalGraph::empty(user.id);
    graph.direct_roles = user
        .roles
        .iter()
        .filter_map(|id| role_names.get(id).map(|name| (*name).to_string()))
        .collect();
    graph.member_groups = user.groups.clone();
    graph.groups = groups
        .iter()
        .map(|group| {
            (
                group.id,
                GroupGrant {
                    id: group.id,
                    name: group.name.clone(),
                    roles: group
                        .roles
                        .iter()
                        .filter_map(|id| role_names.get(id).map(|name| (*name).to_string()))
                        .collect(),
                    exclude_from_matrix: group.exclude_from_matrix,
                },
            )
        })
        .collect();
    graph.positions = positions
        .iter()
        .filter(|position| user.positions.contains(&position.id))
        .map(|position| PositionGrant {
            id: position.id,
            name: position.name.clone(),
            groups: position.groups.clone(),
        })
        .collect();
    Ok(graph)
}
