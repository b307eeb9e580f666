//! Pre-resolved adjacency input for the resolver.
//!
//! # Purpose
//! The resolver never touches the directory store. Callers flatten a
//! principal's relations into a [`PrincipalGraph`] first: id sets for the
//! memberships, plus an id-keyed index of every referenced group so the
//! resolver can follow position→group→role edges without live object
//! references.
use crate::types::{GroupId, PositionId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Role grants carried by a single group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupGrant {
    pub id: GroupId,
    pub name: String,
    /// Role labels this group confers on its members.
    pub roles: BTreeSet<String>,
    /// Membership in this group survives position-driven synchronization.
    pub exclude_from_matrix: bool,
}

/// Groups conferred by a single position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionGrant {
    pub id: PositionId,
    pub name: String,
    pub groups: BTreeSet<GroupId>,
}

/// One principal's relations, flattened for resolution.
///
/// `groups` indexes every group referenced by `member_groups` or by any
/// position's grant set. A referenced id missing from the index is treated
/// as a group granting nothing, never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalGraph {
    pub user_id: UserId,
    /// Role labels assigned directly to the principal.
    pub direct_roles: BTreeSet<String>,
    /// Groups the principal currently belongs to.
    pub member_groups: BTreeSet<GroupId>,
    /// Positions the principal currently holds.
    pub positions: Vec<PositionGrant>,
    /// Id-keyed index of every group the paths above can reach.
    pub groups: BTreeMap<GroupId, GroupGrant>,
}

impl PrincipalGraph {
    /// A graph with no relations at all; every path resolves to empty.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            direct_roles: BTreeSet::new(),
            member_groups: BTreeSet::new(),
            positions: Vec::new(),
            groups: BTreeMap::new(),
        }
    }

    /// Union of groups conferred by the principal's current positions.
    pub fn position_group_targets(&self) -> BTreeSet<GroupId> {
        self.positions
            .iter()
            .flat_map(|position| position.groups.iter().copied())
            .collect()
    }

    /// Ids of currently-held groups flagged `exclude_from_matrix`.
    pub fn held_excluded_groups(&self) -> BTreeSet<GroupId> {
        self.member_groups
            .iter()
            .copied()
            .filter(|id| {
                self.groups
                    .get(id)
                    .is_some_and(|group| group.exclude_from_matrix)
            })
            .collect()
    }
}
