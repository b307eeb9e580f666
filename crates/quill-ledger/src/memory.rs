//! In-memory implementation of the ledger store.
//!
//! # Purpose
//! Keeps the full change history in process memory behind a
//! `tokio::sync::RwLock`. It exists for local development, tests, and
//! deployments that accept losing history on restart.
//!
//! # Durability and consistency
//! - **Not durable**: all records are lost when the process exits.
//! - **Single-process consistency**: appends serialize under the write
//!   lock, so sequence numbers are strictly increasing with no gaps.
//!
//! # Retention
//! The journal is unbounded. Change history is the product here, so
//! nothing is evicted; a durable backend would page old rows to disk
//! instead.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::action::ChangeAction;
use crate::record::{ChangeRecord, RecordDraft};
use crate::store::{LedgerResult, LedgerStore};

/// Append-only journal with process-local sequence numbers.
#[derive(Debug)]
struct Journal {
    next_seq: u64,
    entries: Vec<ChangeRecord>,
}

impl Journal {
    fn new() -> Self {
        // Sequence numbers surface as record ids in views, so they
        // start at 1 like a database rowid.
        Self {
            next_seq: 1,
            entries: Vec::new(),
        }
    }

    fn append(&mut self, make: impl FnOnce(u64) -> ChangeRecord) -> ChangeRecord {
        let seq = self.next_seq;
        self.next_seq += 1;
        let record = make(seq);
        self.entries.push(record.clone());
        record
    }
}

/// In-memory ledger store.
pub struct InMemoryLedger {
    journal: Arc<RwLock<Journal>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            journal: Arc::new(RwLock::new(Journal::new())),
        }
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn append(&self, draft: RecordDraft) -> LedgerResult<ChangeRecord> {
        let mut journal = self.journal.write().await;
        let record = journal.append(|seq| ChangeRecord {
            seq,
            recorded_at: Utc::now(),
            actor: draft.actor,
            object_type: draft.object_type,
            object_id: draft.object_id,
            field: draft.field,
            action: draft.action,
            old_value: draft.old_value,
            new_value: draft.new_value,
            comment: draft.comment,
        });
        metrics::counter!("quill_ledger_records_total").increment(1);
        metrics::gauge!("quill_ledger_entries").set(journal.entries.len() as f64);
        Ok(record)
    }

    async fn for_object(
        &self,
        object_type: &str,
        object_id: i64,
    ) -> LedgerResult<Vec<ChangeRecord>> {
        let journal = self.journal.read().await;
        Ok(journal
            .entries
            .iter()
            .rev()
            .filter(|record| record.object_type == object_type && record.object_id == object_id)
            .cloned()
            .collect())
    }

    async fn by_actor(&self, actor_id: i64) -> LedgerResult<Vec<ChangeRecord>> {
        let journal = self.journal.read().await;
        Ok(journal
            .entries
            .iter()
            .rev()
            .filter(|record| record.actor == Some(actor_id))
            .cloned()
            .collect())
    }

    async fn recent(
        &self,
        object_type: Option<&str>,
        limit: usize,
    ) -> LedgerResult<Vec<ChangeRecord>> {
        let journal = self.journal.read().await;
        Ok(journal
            .entries
            .iter()
            .rev()
            .filter(|record| object_type.is_none_or(|wanted| record.object_type == wanted))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn by_action(
        &self,
        action: &ChangeAction,
        limit: usize,
    ) -> LedgerResult<Vec<ChangeRecord>> {
        let journal = self.journal.read().await;
        Ok(journal
            .entries
            .iter()
            .rev()
            .filter(|record| record.action == *action)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_action(&self, action: &ChangeAction) -> LedgerResult<u64> {
        let journal = self.journal.read().await;
        Ok(journal
            .entries
            .iter()
            .filter(|record| record.action == *action)
            .count() as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
