//! Repository for the `profiles` table.

use cifan_core::profile::UserProfile;
use sqlx::PgPool;

use crate::models::profile::ProfileRow;

const COLUMNS: &str = "user_id, full_name_en, full_name_th, birth_date, phone_number, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Option<ProfileRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, ProfileRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or overwrite a user's profile.
    pub async fn upsert(pool: &PgPool, profile: &UserProfile) -> Result<ProfileRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, full_name_en, full_name_th, birth_date, phone_number, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (user_id) DO UPDATE SET
                full_name_en = EXCLUDED.full_name_en,
                full_name_th = EXCLUDED.full_name_th,
                birth_date = EXCLUDED.birth_date,
                phone_number = EXCLUDED.phone_number,
                updated_at = EXCLUDED.updated_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProfileRow>(&query)
            .bind(&profile.user_id)
            .bind(&profile.full_name_en)
            .bind(&profile.full_name_th)
            .bind(profile.birth_date)
            .bind(&profile.phone_number)
            .bind(profile.updated_at)
            .fetch_one(pool)
            .await
    }
}
