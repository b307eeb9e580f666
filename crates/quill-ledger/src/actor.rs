use serde::{Deserialize, Serialize};

/// Who performed a recorded change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    /// Background jobs and seeding. Rendered as `SYSTEM` in views.
    System,
    /// A signed-in principal.
    Human { id: i64, display_name: String },
}

impl Actor {
    /// Maps an optional principal and a system flag onto an actor.
    ///
    /// The system flag wins even when a principal is supplied, and a
    /// missing principal also resolves to [`Actor::System`].
    pub fn resolve(principal: Option<(i64, String)>, system_actor: bool) -> Self {
        if system_actor {
            return Actor::System;
        }
        match principal {
            Some((id, display_name)) => Actor::Human { id, display_name },
            None => Actor::System,
        }
    }

    /// Principal id persisted on records, `None` for the system actor.
    pub fn actor_id(&self) -> Option<i64> {
        match self {
            Actor::System => None,
            Actor::Human { id, .. } => Some(*id),
        }
    }

    /// Name shown wherever the actor is rendered.
    pub fn display_name(&self) -> &str {
        match self {
            Actor::System => "SYSTEM",
            Actor::Human { display_name, .. } => display_name,
        }
    }
}
