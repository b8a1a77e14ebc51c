//! Profile row model.

use chrono::NaiveDate;
use cifan_core::profile::UserProfile;
use cifan_core::types::{Timestamp, UserId};
use sqlx::FromRow;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub user_id: UserId,
    pub full_name_en: String,
    pub full_name_th: Option<String>,
    pub birth_date: NaiveDate,
    pub phone_number: String,
    pub updated_at: Timestamp,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            user_id: row.user_id,
            full_name_en: row.full_name_en,
            full_name_th: row.full_name_th,
            birth_date: row.birth_date,
            phone_number: row.phone_number,
            updated_at: row.updated_at,
        }
    }
}
