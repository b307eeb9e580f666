//! Position model definitions.
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use quill_authz::{GroupId, PositionId};
use serde::{Deserialize, Serialize};

/// A job position. Holding a position confers membership in its groups
/// via the matrix sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub name: String,
    pub description: Option<String>,
    pub enabled: bool,
    pub groups: BTreeSet<GroupId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Position {
    pub fn new(name: &str) -> Self {
        Self {
            id: PositionId::new(0),
            name: name.to_string(),
            description: None,
            enabled: true,
            groups: BTreeSet::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
