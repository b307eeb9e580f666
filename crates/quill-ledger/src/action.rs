use std::fmt;

use serde::{Deserialize, Serialize};

/// What kind of change a record describes.
///
/// `Display` produces the wording stored in views, so list entries read
/// as `Added item "ops"` rather than a bare variant name. Filtering by
/// action compares enum values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "item", rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
    /// One element joined a list field.
    ListAdd(String),
    /// One element left a list field.
    ListRemove(String),
    /// Domain-specific label such as `matrix_sync` or `impersonate`.
    Custom(String),
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeAction::Created => f.write_str("create"),
            ChangeAction::Updated => f.write_str("update"),
            ChangeAction::Deleted => f.write_str("delete"),
            ChangeAction::ListAdd(item) => write!(f, "Added item \"{item}\""),
            ChangeAction::ListRemove(item) => write!(f, "Removed item \"{item}\""),
            ChangeAction::Custom(label) => f.write_str(label),
        }
    }
}
