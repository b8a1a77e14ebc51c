//! The record store seam.

mod memory;
mod postgres;

use async_trait::async_trait;
use cifan_core::profile::UserProfile;
use cifan_core::types::RawRecord;

pub use memory::MemoryStore;
pub use postgres::PgRecordStore;

pub use crate::models::submission::StoredRecord;
use crate::error::StoreError;

/// Reads and writes submission documents and profiles.
///
/// Writes are partial-field merges or whole-document deletes; there is no
/// concurrency token, the last writer wins.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Fetch a document by id, `None` if it does not exist.
    async fn get(&self, id: &str) -> Result<Option<RawRecord>, StoreError>;

    /// All documents owned by `user_id`, newest `lastModified` first.
    ///
    /// Backends without an index for this ordering return
    /// [`StoreError::QueryUnsupported`].
    async fn list_by_owner_ordered(&self, user_id: &str) -> Result<Vec<StoredRecord>, StoreError>;

    /// All documents owned by `user_id`, in no particular order.
    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<StoredRecord>, StoreError>;

    /// Create or replace a document. The owner is taken from `userId`.
    async fn put(&self, record: StoredRecord) -> Result<(), StoreError>;

    /// Merge `fields` into the document's top level. Returns `false` if the
    /// document does not exist.
    async fn update_fields(&self, id: &str, fields: RawRecord) -> Result<bool, StoreError>;

    /// Remove a document. Returns `false` if it did not exist.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
