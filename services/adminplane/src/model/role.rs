//! Role model definitions.
use chrono::{DateTime, Utc};
use quill_authz::RoleId;
use serde::{Deserialize, Serialize};

/// A role label such as `admin` or `route:users#edit`. Permission checks
/// compare labels, so names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Role {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            id: RoleId::new(0),
            name: name.to_string(),
            description: Some(description.to_string()),
            created_at: Utc::now(),
        }
    }
}
