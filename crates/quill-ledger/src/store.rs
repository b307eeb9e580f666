use async_trait::async_trait;
use thiserror::Error;

use crate::action::ChangeAction;
use crate::record::{ChangeRecord, RecordDraft};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Storage backend for change records.
///
/// View methods return records newest-first. Appends assign `seq` and
/// `recorded_at`; everything else in the draft is persisted verbatim.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn append(&self, draft: RecordDraft) -> LedgerResult<ChangeRecord>;

    async fn for_object(
        &self,
        object_type: &str,
        object_id: i64,
    ) -> LedgerResult<Vec<ChangeRecord>>;
    async fn by_actor(&self, actor_id: i64) -> LedgerResult<Vec<ChangeRecord>>;
    async fn recent(
        &self,
        object_type: Option<&str>,
        limit: usize,
    ) -> LedgerResult<Vec<ChangeRecord>>;
    async fn by_action(
        &self,
        action: &ChangeAction,
        limit: usize,
    ) -> LedgerResult<Vec<ChangeRecord>>;
    async fn count_action(&self, action: &ChangeAction) -> LedgerResult<u64>;

    fn backend_name(&self) -> &'static str;
}
