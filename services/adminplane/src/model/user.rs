//! User model definitions.
//!
//! # Purpose
//! Defines the directory's user record: identity scalars, relation id
//! sets, and the delegation scopes the user may hand out.
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use quill_authz::{AssignableSet, CountryId, GroupId, PositionId, RoleId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Enabled flag. Disabled users keep their assignments.
    pub status: bool,
    /// Home country code, distinct from the `countries` relation.
    pub country: Option<String>,
    pub groups: BTreeSet<GroupId>,
    pub roles: BTreeSet<RoleId>,
    pub positions: BTreeSet<PositionId>,
    pub countries: BTreeSet<CountryId>,
    pub assignable: AssignableSet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A blank record for the store to assign an id and timestamps to.
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            id: UserId::new(0),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            status: true,
            country: None,
            groups: BTreeSet::new(),
            roles: BTreeSet::new(),
            positions: BTreeSet::new(),
            countries: BTreeSet::new(),
            assignable: AssignableSet::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Name shown in change views and impersonation comments.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
