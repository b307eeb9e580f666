//! Quill permission primitives shared by the admin-plane service.
//!
//! # Purpose
//! Centralizes the permission model: effective-role aggregation across the
//! three membership paths (direct roles, group roles, position-conferred
//! group roles), the `require_any` check primitive, assignable-rights
//! resolution, and the position→group synchronization decision.
//!
//! # How it fits
//! The admin-plane service loads a principal's relations from its directory
//! store into a [`PrincipalGraph`] and asks this crate whether an operation
//! may proceed. The crate never performs data retrieval of its own; every
//! function here is a pure computation over pre-resolved adjacency sets.
//!
//! # Key invariants
//! - Role aggregation is purely additive: `effective_roles` is always a
//!   superset of the principal's direct roles.
//! - The literal role `admin` satisfies every permission check.
//! - Assignable rights are orthogonal to held rights; a principal may be
//!   allowed to grant a role it does not itself hold.
//!
//! # Examples
//! ```rust
//! use std::collections::BTreeMap;
//! use quill_authz::{GroupGrant, GroupId, PrincipalGraph, UserId, effective_roles};
//!
//! let finance = GroupGrant {
//!     id: GroupId::new(7),
//!     name: "finance".to_string(),
//!     roles: ["route:users#view".to_string()].into(),
//!     exclude_from_matrix: false,
//! };
//! let graph = PrincipalGraph {
//!     user_id: UserId::new(1),
//!     direct_roles: ["route:about".to_string()].into(),
//!     member_groups: [finance.id].into(),
//!     positions: Vec::new(),
//!     groups: BTreeMap::from([(finance.id, finance)]),
//! };
//! let roles = effective_roles(&graph);
//! assert!(roles.contains("route:about"));
//! assert!(roles.contains("route:users#view"));
//! ```
//!
//! # Common pitfalls
//! - Passing an empty `allowed` slice to `require_any` denies everyone
//!   except admins; callers that mean "any authenticated principal" must
//!   not call it at all.
//! - A `PrincipalGraph` whose `groups` index is missing a referenced group
//!   treats that group as granting nothing; build the index from the same
//!   snapshot as the membership sets.

mod assignable;
mod errors;
mod graph;
mod matrix;
mod resolver;
mod types;

pub use assignable::{AssignableSet, assignable_rights};
pub use errors::{AuthzError, AuthzResult};
pub use graph::{GroupGrant, PositionGrant, PrincipalGraph};
pub use matrix::{MatrixSyncPlan, plan_matrix_sync};
pub use resolver::{ADMIN_ROLE, effective_roles, is_authorized, require_any};
pub use types::{CountryId, GroupId, PositionId, RoleId, UserId};
