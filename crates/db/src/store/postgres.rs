use async_trait::async_trait;
use cifan_core::profile::UserProfile;
use cifan_core::timestamp::parse_timestamp;
use cifan_core::types::{RawRecord, Timestamp};
use serde_json::Value;

use super::{RecordStore, StoredRecord};
use crate::error::StoreError;
use crate::repositories::{ProfileRepo, SubmissionRepo};
use crate::DbPool;

/// PostgreSQL-backed store: one JSONB row per document.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn last_modified(fields: &RawRecord) -> Option<Timestamp> {
    fields.get("lastModified").and_then(parse_timestamp)
}

fn into_records(
    rows: Vec<crate::models::submission::SubmissionRow>,
) -> Result<Vec<StoredRecord>, StoreError> {
    rows.into_iter().map(StoredRecord::try_from).collect()
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn get(&self, id: &str) -> Result<Option<RawRecord>, StoreError> {
        let row = SubmissionRepo::find_by_id(&self.pool, id).await?;
        row.map(|row| StoredRecord::try_from(row).map(|record| record.data))
            .transpose()
    }

    async fn list_by_owner_ordered(&self, user_id: &str) -> Result<Vec<StoredRecord>, StoreError> {
        into_records(SubmissionRepo::list_by_owner_ordered(&self.pool, user_id).await?)
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<StoredRecord>, StoreError> {
        into_records(SubmissionRepo::list_by_owner(&self.pool, user_id).await?)
    }

    async fn put(&self, record: StoredRecord) -> Result<(), StoreError> {
        let user_id = record.user_id().unwrap_or_default().to_string();
        let modified = last_modified(&record.data);
        let data = Value::Object(record.data);
        SubmissionRepo::upsert(&self.pool, &record.id, &user_id, &data, modified).await?;
        Ok(())
    }

    async fn update_fields(&self, id: &str, fields: RawRecord) -> Result<bool, StoreError> {
        let modified = last_modified(&fields);
        let field_count = fields.len();
        let fields = Value::Object(fields);
        let updated = SubmissionRepo::merge_fields(&self.pool, id, &fields, modified).await?;
        tracing::debug!(id, field_count, updated, "Merged submission fields");
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let deleted = SubmissionRepo::hard_delete(&self.pool, id).await?;
        tracing::debug!(id, deleted, "Deleted submission");
        Ok(deleted)
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(ProfileRepo::find_by_user(&self.pool, user_id)
            .await?
            .map(UserProfile::from))
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        ProfileRepo::upsert(&self.pool, profile).await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
