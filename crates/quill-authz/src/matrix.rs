//! # Purpose
//! Pure decision logic for position-driven group reconciliation.
//!
//! # How it fits
//! The admin backend periodically realigns each user's group memberships
//! with whatever their positions confer. This module computes the target
//! state for one principal; callers persist the result and write change
//! records. Scheduling and persistence live elsewhere.
//!
//! # Key invariants
//! - A held group flagged `exclude_from_matrix` is never removed, even
//!   when no position confers it.
//! - Exclusion never blocks additions: a conferred group is always part
//!   of the target.
//! - A plan is only produced when the final set differs from the current
//!   memberships, so a no-op sync writes nothing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::graph::PrincipalGraph;
use crate::types::GroupId;

/// The computed outcome of one reconciliation pass for one principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixSyncPlan {
    /// Memberships after the sync: conferred groups plus held exclusions.
    pub final_groups: BTreeSet<GroupId>,
    /// Groups the sync adds.
    pub added: BTreeSet<GroupId>,
    /// Groups the sync removes.
    pub removed: BTreeSet<GroupId>,
    /// Held excluded groups kept despite no position conferring them.
    pub retained: BTreeSet<GroupId>,
}

/// Decides what one sync pass should do to a principal's memberships.
///
/// Returns `None` when the principal is already in the target state.
pub fn plan_matrix_sync(graph: &PrincipalGraph) -> Option<MatrixSyncPlan> {
    let target = graph.position_group_targets();
    let held_excluded = graph.held_excluded_groups();

    let final_groups: BTreeSet<GroupId> = target.union(&held_excluded).copied().collect();
    if final_groups == graph.member_groups {
        return None;
    }

    let added = final_groups
        .difference(&graph.member_groups)
        .copied()
        .collect();
    let removed = graph
        .member_groups
        .difference(&final_groups)
        .copied()
        .collect();
    let retained = held_excluded.difference(&target).copied().collect();

    Some(MatrixSyncPlan {
        final_groups,
        added,
        removed,
        retained,
    })
}
