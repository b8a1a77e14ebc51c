use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use cifan_core::profile::UserProfile;
use cifan_core::timestamp::parse_timestamp;
use cifan_core::types::RawRecord;
use tokio::sync::RwLock;

use super::{RecordStore, StoredRecord};
use crate::error::StoreError;

/// In-process store for local development and tests.
///
/// `ordered_queries = false` mimics a backend lacking the owner/lastModified
/// index: ordered listings fail with [`StoreError::QueryUnsupported`].
/// [`MemoryStore::set_fail_writes`] makes every write fail, to exercise
/// error paths.
#[derive(Debug)]
pub struct MemoryStore {
    submissions: RwLock<BTreeMap<String, RawRecord>>,
    profiles: RwLock<HashMap<String, UserProfile>>,
    ordered_queries: bool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            submissions: RwLock::new(BTreeMap::new()),
            profiles: RwLock::new(HashMap::new()),
            ordered_queries: true,
            fail_writes: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// A store whose ordered listing query is unavailable.
    pub fn without_ordered_queries() -> Self {
        Self {
            ordered_queries: false,
            ..Self::new()
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes (put, update, delete, profile save).
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn begin_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes are disabled".into()));
        }
        Ok(())
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    async fn owned_by(&self, user_id: &str) -> Vec<StoredRecord> {
        self.submissions
            .read()
            .await
            .iter()
            .map(|(id, data)| StoredRecord::new(id.clone(), data.clone()))
            .filter(|record| record.user_id() == Some(user_id))
            .collect()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<RawRecord>, StoreError> {
        Ok(self.submissions.read().await.get(id).cloned())
    }

    async fn list_by_owner_ordered(&self, user_id: &str) -> Result<Vec<StoredRecord>, StoreError> {
        if !self.ordered_queries {
            return Err(StoreError::QueryUnsupported(
                "no index on (userId, lastModified)".into(),
            ));
        }
        let mut records = self.owned_by(user_id).await;
        records.sort_by_key(|record| {
            std::cmp::Reverse(record.data.get("lastModified").and_then(parse_timestamp))
        });
        Ok(records)
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<StoredRecord>, StoreError> {
        Ok(self.owned_by(user_id).await)
    }

    async fn put(&self, record: StoredRecord) -> Result<(), StoreError> {
        self.begin_write()?;
        self.submissions.write().await.insert(record.id, record.data);
        self.record_write();
        Ok(())
    }

    async fn update_fields(&self, id: &str, fields: RawRecord) -> Result<bool, StoreError> {
        self.begin_write()?;
        let mut submissions = self.submissions.write().await;
        let Some(data) = submissions.get_mut(id) else {
            return Ok(false);
        };
        data.extend(fields);
        self.record_write();
        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.begin_write()?;
        let removed = self.submissions.write().await.remove(id).is_some();
        if removed {
            self.record_write();
        }
        Ok(removed)
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.begin_write()?;
        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile.clone());
        self.record_write();
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
