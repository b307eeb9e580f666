//! Value rendering shared by every store backend.
//!
//! # Notes
//! Rendering happens before records reach a store, so two backends never
//! disagree on how an absent value or a membership set is written.

use std::collections::BTreeSet;

/// Placeholder stored when a value is absent or empty.
pub const EMPTY_SENTINEL: &str = "∅";

/// Renders an optional scalar for storage.
pub fn display_scalar(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => EMPTY_SENTINEL.to_string(),
    }
}

/// Renders a membership set as a sorted, comma-joined line.
pub fn display_set(values: &BTreeSet<String>) -> String {
    if values.is_empty() {
        return EMPTY_SENTINEL.to_string();
    }
    values.iter().cloned().collect::<Vec<_>>().join(", ")
}
