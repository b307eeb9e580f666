//! # Purpose
//! Delegation scopes: which groups, positions, roles, and countries a
//! principal may hand out when editing other users.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::graph::PrincipalGraph;
use crate::resolver::{ADMIN_ROLE, effective_roles};
use crate::types::{CountryId, GroupId, PositionId, RoleId};

/// The four delegation scopes stored per user.
///
/// An empty set means the user may not assign anything in that scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignableSet {
    pub groups: BTreeSet<GroupId>,
    pub positions: BTreeSet<PositionId>,
    pub roles: BTreeSet<RoleId>,
    pub countries: BTreeSet<CountryId>,
}

impl AssignableSet {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
            && self.positions.is_empty()
            && self.roles.is_empty()
            && self.countries.is_empty()
    }
}

/// Resolves the delegation scopes to present for `target`.
///
/// An admin looking at their own record sees the full `universe` so the
/// editing surface never locks an administrator out of anything. Every
/// other combination sees exactly the target's stored scopes.
pub fn assignable_rights(
    caller: &PrincipalGraph,
    target: &AssignableSet,
    is_self: bool,
    universe: &AssignableSet,
) -> AssignableSet {
    if is_self && effective_roles(caller).contains(ADMIN_ROLE) {
        return universe.clone();
    }
    target.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    fn universe() -> AssignableSet {
        AssignableSet {
            groups: [GroupId::new(1), GroupId::new(2)].into_iter().collect(),
            positions: [PositionId::new(1)].into_iter().collect(),
            roles: [RoleId::new(1), RoleId::new(2), RoleId::new(3)]
                .into_iter()
                .collect(),
            countries: [CountryId::new(1)].into_iter().collect(),
        }
    }

    fn stored() -> AssignableSet {
        AssignableSet {
            groups: [GroupId::new(2)].into_iter().collect(),
            ..AssignableSet::default()
        }
    }

    fn admin_graph() -> PrincipalGraph {
        let mut graph = PrincipalGraph::empty(UserId::new(1));
        graph.direct_roles.insert(ADMIN_ROLE.to_string());
        graph
    }

    #[test]
    fn admin_editing_self_sees_the_universe() {
        let resolved = assignable_rights(&admin_graph(), &stored(), true, &universe());
        assert_eq!(resolved, universe());
    }

    #[test]
    fn admin_editing_someone_else_sees_stored_scopes() {
        let resolved = assignable_rights(&admin_graph(), &stored(), false, &universe());
        assert_eq!(resolved, stored());
    }

    #[test]
    fn non_admin_editing_self_sees_stored_scopes() {
        let graph = PrincipalGraph::empty(UserId::new(2));
        let resolved = assignable_rights(&graph, &stored(), true, &universe());
        assert_eq!(resolved, stored());
    }

    #[test]
    fn empty_set_reports_empty() {
        assert!(AssignableSet::default().is_empty());
        assert!(!stored().is_empty());
    }
}
