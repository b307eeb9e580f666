//! Write front door for the change ledger.
//!
//! # Purpose
//! Validates targets and renders values before anything reaches a
//! [`LedgerStore`], so every backend persists identical strings.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::action::ChangeAction;
use crate::actor::Actor;
use crate::record::{ChangeRecord, RecordDraft};
use crate::render::{display_scalar, display_set};
use crate::store::{LedgerError, LedgerResult, LedgerStore};

/// Records changes against a pluggable store.
///
/// Cloning is cheap; clones share the same store.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn LedgerStore>,
}

impl Ledger {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// Read access for view builders.
    pub fn store(&self) -> &Arc<dyn LedgerStore> {
        &self.store
    }

    /// Records one scalar transition on `field`.
    ///
    /// Absent and empty values are stored as the `∅` placeholder on
    /// both sides of the transition.
    #[allow(clippy::too_many_arguments)]
    pub async fn record_scalar(
        &self,
        actor: &Actor,
        object_type: &str,
        object_id: i64,
        field: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
        action: ChangeAction,
        comment: Option<&str>,
    ) -> LedgerResult<ChangeRecord> {
        validate_target(object_type, object_id, field)?;
        let record = self
            .store
            .append(RecordDraft {
                actor: actor.actor_id(),
                object_type: object_type.to_string(),
                object_id,
                field: field.to_string(),
                action,
                old_value: display_scalar(old_value),
                new_value: display_scalar(new_value),
                comment: comment.map(str::to_string),
            })
            .await?;
        tracing::debug!(
            seq = record.seq,
            object_type,
            object_id,
            field,
            "change recorded"
        );
        Ok(record)
    }

    /// Records membership changes on a list `field`.
    ///
    /// Writes one record per element, additions before removals, each
    /// side in lexicographic order. Every record carries the full
    /// before and after renders of the set. Equal sets write nothing.
    #[allow(clippy::too_many_arguments)]
    pub async fn record_list_diff(
        &self,
        actor: &Actor,
        object_type: &str,
        object_id: i64,
        field: &str,
        old_values: &BTreeSet<String>,
        new_values: &BTreeSet<String>,
        comment: Option<&str>,
    ) -> LedgerResult<Vec<ChangeRecord>> {
        validate_target(object_type, object_id, field)?;
        let old_render = display_set(old_values);
        let new_render = display_set(new_values);

        // BTreeSet::difference iterates in sorted order, which fixes
        // the per-side record order.
        let mut drafts = Vec::new();
        for item in new_values.difference(old_values) {
            drafts.push(list_draft(
                actor,
                object_type,
                object_id,
                field,
                ChangeAction::ListAdd(item.clone()),
                &old_render,
                &new_render,
                comment,
            ));
        }
        for item in old_values.difference(new_values) {
            drafts.push(list_draft(
                actor,
                object_type,
                object_id,
                field,
                ChangeAction::ListRemove(item.clone()),
                &old_render,
                &new_render,
                comment,
            ));
        }

        let mut records = Vec::with_capacity(drafts.len());
        for draft in drafts {
            records.push(self.store.append(draft).await?);
        }
        if !records.is_empty() {
            tracing::debug!(
                count = records.len(),
                object_type,
                object_id,
                field,
                "list diff recorded"
            );
        }
        Ok(records)
    }
}

#[allow(clippy::too_many_arguments)]
fn list_draft(
    actor: &Actor,
    object_type: &str,
    object_id: i64,
    field: &str,
    action: ChangeAction,
    old_render: &str,
    new_render: &str,
    comment: Option<&str>,
) -> RecordDraft {
    RecordDraft {
        actor: actor.actor_id(),
        object_type: object_type.to_string(),
        object_id,
        field: field.to_string(),
        action,
        old_value: old_render.to_string(),
        new_value: new_render.to_string(),
        comment: comment.map(str::to_string),
    }
}

fn validate_target(object_type: &str, object_id: i64, field: &str) -> LedgerResult<()> {
    if object_type.trim().is_empty() {
        return Err(LedgerError::InvalidInput(
            "object_type must not be empty".to_string(),
        ));
    }
    if field.trim().is_empty() {
        return Err(LedgerError::InvalidInput(
            "field must not be empty".to_string(),
        ));
    }
    if object_id <= 0 {
        return Err(LedgerError::InvalidInput(format!(
            "object_id must be positive, got {object_id}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryLedger;
    use crate::render::EMPTY_SENTINEL;

    fn ledger() -> Ledger {
        Ledger::new(Arc::new(InMemoryLedger::new()))
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|item| (*item).to_string()).collect()
    }

    fn human() -> Actor {
        Actor::Human {
            id: 3,
            display_name: "Grace Hopper".to_string(),
        }
    }

    #[tokio::test]
    async fn scalar_records_store_placeholders_for_absent_values() {
        let ledger = ledger();
        let record = ledger
            .record_scalar(
                &human(),
                "User",
                8,
                "User",
                None,
                Some("grace@example.com"),
                ChangeAction::Created,
                Some("User Grace Hopper created"),
            )
            .await
            .expect("record");
        assert_eq!(record.old_value, EMPTY_SENTINEL);
        assert_eq!(record.new_value, "grace@example.com");
        assert_eq!(record.actor, Some(3));
        assert_eq!(record.comment.as_deref(), Some("User Grace Hopper created"));
    }

    #[tokio::test]
    async fn empty_strings_store_as_the_placeholder() {
        let ledger = ledger();
        let record = ledger
            .record_scalar(
                &Actor::System,
                "Group",
                2,
                "Description",
                Some(""),
                Some("On-call rotation"),
                ChangeAction::Updated,
                None,
            )
            .await
            .expect("record");
        assert_eq!(record.old_value, EMPTY_SENTINEL);
        assert_eq!(record.actor, None);
    }

    #[tokio::test]
    async fn list_diff_orders_additions_before_removals() {
        let ledger = ledger();
        let records = ledger
            .record_list_diff(
                &human(),
                "User",
                8,
                "Groups",
                &set(&["basic", "legacy"]),
                &set(&["basic", "ops", "admin"]),
                Some("edited in the admin screen"),
            )
            .await
            .expect("record");

        let actions: Vec<String> = records.iter().map(|r| r.action.to_string()).collect();
        assert_eq!(
            actions,
            vec![
                "Added item \"admin\"",
                "Added item \"ops\"",
                "Removed item \"legacy\"",
            ]
        );
        for record in &records {
            assert_eq!(record.old_value, "basic, legacy");
            assert_eq!(record.new_value, "admin, basic, ops");
            assert_eq!(record.comment.as_deref(), Some("edited in the admin screen"));
        }
    }

    #[tokio::test]
    async fn equal_sets_write_nothing() {
        let ledger = ledger();
        let records = ledger
            .record_list_diff(
                &human(),
                "User",
                8,
                "Groups",
                &set(&["basic"]),
                &set(&["basic"]),
                None,
            )
            .await
            .expect("record");
        assert!(records.is_empty());
        let stored = ledger.store().recent(None, 10).await.expect("view");
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn emptied_list_renders_the_placeholder_on_the_new_side() {
        let ledger = ledger();
        let records = ledger
            .record_list_diff(
                &human(),
                "Group",
                5,
                "Roles",
                &set(&["route:about"]),
                &BTreeSet::new(),
                None,
            )
            .await
            .expect("record");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].new_value, EMPTY_SENTINEL);
        assert_eq!(records[0].old_value, "route:about");
    }

    #[tokio::test]
    async fn targets_are_validated_before_anything_is_written() {
        let ledger = ledger();
        let blank_type = ledger
            .record_scalar(
                &human(),
                "",
                1,
                "Name",
                None,
                Some("x"),
                ChangeAction::Updated,
                None,
            )
            .await;
        assert!(matches!(blank_type, Err(LedgerError::InvalidInput(_))));

        let bad_id = ledger
            .record_list_diff(&human(), "User", 0, "Groups", &set(&["a"]), &set(&[]), None)
            .await;
        assert!(matches!(bad_id, Err(LedgerError::InvalidInput(_))));

        let blank_field = ledger
            .record_scalar(
                &human(),
                "User",
                1,
                " ",
                None,
                Some("x"),
                ChangeAction::Updated,
                None,
            )
            .await;
        assert!(matches!(blank_field, Err(LedgerError::InvalidInput(_))));

        let stored = ledger.store().recent(None, 10).await.expect("view");
        assert!(stored.is_empty());
    }
}
