//! Repository for the `submissions` table.

use cifan_core::types::Timestamp;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::submission::SubmissionRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, data, last_modified, created_at";

/// Provides document operations for submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a document, replacing any existing document with the same id.
    pub async fn upsert(
        pool: &PgPool,
        id: &str,
        user_id: &str,
        data: &Value,
        last_modified: Option<Timestamp>,
    ) -> Result<SubmissionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions (id, user_id, data, last_modified)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                data = EXCLUDED.data,
                last_modified = EXCLUDED.last_modified
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(id)
            .bind(user_id)
            .bind(Json(data))
            .bind(last_modified)
            .fetch_one(pool)
            .await
    }

    /// Find a document by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<SubmissionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE id = $1");
        sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's documents, most recently modified first.
    pub async fn list_by_owner_ordered(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<SubmissionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM submissions
             WHERE user_id = $1
             ORDER BY last_modified DESC NULLS LAST, id"
        );
        sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List a user's documents in storage order.
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<SubmissionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE user_id = $1");
        sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Merge `fields` into a document's top level. `last_modified` updates the
    /// indexed column when given.
    ///
    /// Returns `false` if no document with the given `id` exists.
    pub async fn merge_fields(
        pool: &PgPool,
        id: &str,
        fields: &Value,
        last_modified: Option<Timestamp>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE submissions SET
                data = data || $2,
                last_modified = COALESCE($3, last_modified)
             WHERE id = $1",
        )
        .bind(id)
        .bind(Json(fields))
        .bind(last_modified)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a document by id. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
