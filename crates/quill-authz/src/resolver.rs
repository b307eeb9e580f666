//! # Purpose
//! Role aggregation and permission checks over a loaded [`PrincipalGraph`].
//!
//! # Notes
//! - Roles are compared by label, never by id.
//! - The `admin` label short-circuits every check, including checks with
//!   an empty allowed list.

use std::collections::BTreeSet;

use crate::errors::{AuthzError, AuthzResult};
use crate::graph::PrincipalGraph;

/// Role label that bypasses every permission check.
pub const ADMIN_ROLE: &str = "admin";

/// Computes the full set of role labels a principal holds.
///
/// The result is the union of three sources: roles assigned directly to
/// the user, roles granted by the groups the user is a member of, and
/// roles granted by the groups each of the user's positions confers.
/// Group ids with no entry in the graph's group index contribute nothing.
pub fn effective_roles(graph: &PrincipalGraph) -> BTreeSet<String> {
    // Step 1: start from the roles assigned directly to the user.
    let mut roles = graph.direct_roles.clone();

    // Step 2: add roles from direct group memberships.
    for group_id in &graph.member_groups {
        if let Some(group) = graph.groups.get(group_id) {
            roles.extend(group.roles.iter().cloned());
        }
    }

    // Step 3: add roles from groups conferred through positions.
    for position in &graph.positions {
        for group_id in &position.groups {
            if let Some(group) = graph.groups.get(group_id) {
                roles.extend(group.roles.iter().cloned());
            }
        }
    }

    roles
}

/// Returns true when the principal may perform an operation guarded by
/// `allowed`.
///
/// Holders of [`ADMIN_ROLE`] pass unconditionally. Everyone else passes
/// only when their effective roles intersect `allowed`, so an empty
/// `allowed` list denies all non-admin principals.
pub fn is_authorized(graph: &PrincipalGraph, allowed: &[&str]) -> bool {
    let roles = effective_roles(graph);
    if roles.contains(ADMIN_ROLE) {
        return true;
    }
    allowed.iter().any(|role| roles.contains(*role))
}

/// Like [`is_authorized`] but returns a descriptive error on denial.
pub fn require_any(graph: &PrincipalGraph, allowed: &[&str]) -> AuthzResult<()> {
    if is_authorized(graph, allowed) {
        return Ok(());
    }
    Err(AuthzError::NotAuthorized {
        user_id: graph.user_id,
        allowed: allowed.iter().map(|role| (*role).to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GroupGrant, PositionGrant};
    use crate::types::{GroupId, PositionId, UserId};

    fn group(id: i64, name: &str, roles: &[&str]) -> GroupGrant {
        GroupGrant {
            id: GroupId::new(id),
            name: name.to_string(),
            roles: roles.iter().map(|role| (*role).to_string()).collect(),
            exclude_from_matrix: false,
        }
    }

    fn three_path_graph() -> PrincipalGraph {
        // Direct role, a group membership, and a position each contribute
        // one distinct role.
        let mut graph = PrincipalGraph::empty(UserId::new(1));
        graph.direct_roles.insert("viewer".to_string());
        graph.member_groups.insert(GroupId::new(10));
        graph.positions.push(PositionGrant {
            id: PositionId::new(100),
            name: "Lead".to_string(),
            groups: [GroupId::new(20)].into_iter().collect(),
        });
        graph
            .groups
            .insert(GroupId::new(10), group(10, "Editors", &["editor"]));
        graph
            .groups
            .insert(GroupId::new(20), group(20, "Auditors", &["auditor"]));
        graph
    }

    #[test]
    fn effective_roles_unions_all_three_sources() {
        let graph = three_path_graph();
        let roles = effective_roles(&graph);
        let expected: BTreeSet<String> = ["viewer", "editor", "auditor"]
            .into_iter()
            .map(str::to_string)
            .collect();
        assert_eq!(roles, expected);
    }

    #[test]
    fn effective_roles_is_idempotent() {
        let graph = three_path_graph();
        assert_eq!(effective_roles(&graph), effective_roles(&graph));
    }

    #[test]
    fn adding_a_membership_never_shrinks_the_role_set() {
        let mut graph = three_path_graph();
        let before = effective_roles(&graph);
        graph
            .groups
            .insert(GroupId::new(30), group(30, "Operators", &["operator"]));
        graph.member_groups.insert(GroupId::new(30));
        let after = effective_roles(&graph);
        assert!(after.is_superset(&before));
        assert!(after.contains("operator"));
    }

    #[test]
    fn unknown_group_ids_contribute_nothing() {
        let mut graph = PrincipalGraph::empty(UserId::new(2));
        graph.member_groups.insert(GroupId::new(404));
        assert!(effective_roles(&graph).is_empty());
    }

    #[test]
    fn admin_bypasses_even_an_empty_allowed_list() {
        let mut graph = PrincipalGraph::empty(UserId::new(3));
        graph.direct_roles.insert(ADMIN_ROLE.to_string());
        assert!(is_authorized(&graph, &[]));
        assert!(is_authorized(&graph, &["route:users#edit"]));
    }

    #[test]
    fn non_admin_needs_an_intersection() {
        let graph = three_path_graph();
        assert!(is_authorized(&graph, &["editor", "route:users#edit"]));
        assert!(!is_authorized(&graph, &["route:users#edit"]));
        assert!(!is_authorized(&graph, &[]));
    }

    #[test]
    fn require_any_reports_the_roles_it_wanted() {
        let graph = three_path_graph();
        let error = require_any(&graph, &["route:users#create"])
            .expect_err("non-admin without the role must be denied");
        match error {
            AuthzError::NotAuthorized { user_id, allowed } => {
                assert_eq!(user_id, UserId::new(1));
                assert_eq!(allowed, vec!["route:users#create".to_string()]);
            }
        }
    }

    #[test]
    fn admin_granted_through_a_position_also_bypasses() {
        let mut graph = PrincipalGraph::empty(UserId::new(4));
        graph.positions.push(PositionGrant {
            id: PositionId::new(7),
            name: "Super Admin".to_string(),
            groups: [GroupId::new(1)].into_iter().collect(),
        });
        graph
            .groups
            .insert(GroupId::new(1), group(1, "admin", &[ADMIN_ROLE]));
        assert!(is_authorized(&graph, &[]));
    }
}
