use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::action::ChangeAction;

/// One persisted entry in the change ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Monotonic id assigned by the store at append time.
    pub seq: u64,
    pub recorded_at: DateTime<Utc>,
    /// Principal id, `None` when the system acted.
    pub actor: Option<i64>,
    pub object_type: String,
    pub object_id: i64,
    pub field: String,
    pub action: ChangeAction,
    pub old_value: String,
    pub new_value: String,
    pub comment: Option<String>,
}

/// A record before the store assigns `seq` and `recorded_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub actor: Option<i64>,
    pub object_type: String,
    pub object_id: i64,
    pub field: String,
    pub action: ChangeAction,
    pub old_value: String,
    pub new_value: String,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_records_serialize_with_a_null_actor() {
        let record = ChangeRecord {
            seq: 1,
            recorded_at: Utc::now(),
            actor: None,
            object_type: "User".to_string(),
            object_id: 4,
            field: "Matrix Sync".to_string(),
            action: ChangeAction::Custom("matrix_sync".to_string()),
            old_value: "∅".to_string(),
            new_value: "basic".to_string(),
            comment: None,
        };
        let value = serde_json::to_value(&record).expect("record serializes");
        assert!(value["actor"].is_null());
        assert_eq!(value["object_type"], "User");
        assert_eq!(value["action"]["kind"], "custom");
    }
}
