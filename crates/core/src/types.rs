/// Opaque document identifier assigned by the record store.
pub type RecordId = String;

/// Identity of the requesting user (the `sub` of their access token).
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A raw stored document: arbitrary, partially populated fields.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;
