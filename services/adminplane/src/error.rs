use quill_authz::AuthzError;
use quill_ledger::LedgerError;
use thiserror::Error;

use crate::store::StoreError;

/// Failure modes surfaced by workflow operations.
///
/// Ledger failures propagate as errors and fail the whole operation;
/// history is never dropped to let a mutation "succeed".
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    NotAuthorized(#[from] AuthzError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Store(StoreError),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => WorkflowError::NotFound(what),
            StoreError::Conflict(what) => WorkflowError::Conflict(what),
            other => WorkflowError::Store(other),
        }
    }
}
