//! Submission document model.

use cifan_core::types::{RawRecord, RecordId, Timestamp};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

use crate::error::StoreError;

/// A row from the `submissions` table.
#[derive(Debug, Clone, FromRow)]
pub struct SubmissionRow {
    pub id: RecordId,
    pub user_id: String,
    pub data: Json<Value>,
    pub last_modified: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A stored document together with its key.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: RecordId,
    pub data: RawRecord,
}

impl StoredRecord {
    pub fn new(id: impl Into<RecordId>, data: RawRecord) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Owner recorded in the document, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.data.get("userId").and_then(Value::as_str)
    }
}

impl TryFrom<SubmissionRow> for StoredRecord {
    type Error = StoreError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        match row.data.0 {
            Value::Object(data) => Ok(Self { id: row.id, data }),
            _ => Err(StoreError::Malformed { id: row.id }),
        }
    }
}
