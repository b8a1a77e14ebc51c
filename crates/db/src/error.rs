/// Failure talking to the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document stored under `id` is not a JSON object.
    #[error("Malformed document {id}: expected an object")]
    Malformed { id: String },

    /// The backend cannot serve this query shape (e.g. a missing index).
    #[error("Query unsupported: {0}")]
    QueryUnsupported(String),

    /// The backend rejected or could not reach the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
