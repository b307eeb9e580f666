//! Group model definitions.
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use quill_authz::{GroupId, RoleId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: Option<String>,
    pub enabled: bool,
    /// Held memberships in this group survive a matrix sync even when
    /// no position confers the group.
    pub exclude_from_matrix: bool,
    pub roles: BTreeSet<RoleId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: &str) -> Self {
        Self {
            id: GroupId::new(0),
            name: name.to_string(),
            description: None,
            enabled: true,
            exclude_from_matrix: false,
            roles: BTreeSet::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
