//! Requester profile read and update.

use chrono::Utc;
use cifan_core::error::CoreError;
use cifan_core::profile::{ProfileUpdate, UserProfile};
use cifan_db::store::RecordStore;

use crate::error::{AppError, AppResult};

pub const ENTITY_PROFILE: &str = "Profile";

/// The stored profile of `user_id`.
pub async fn get(store: &dyn RecordStore, user_id: &str) -> AppResult<UserProfile> {
    store
        .get_profile(user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: ENTITY_PROFILE,
                id: user_id.to_string(),
            })
        })
}

/// Validate `input` and replace the profile of `user_id`.
pub async fn update(
    store: &dyn RecordStore,
    user_id: &str,
    input: ProfileUpdate,
) -> AppResult<UserProfile> {
    let profile = input.into_profile(user_id, Utc::now())?;
    store.save_profile(&profile).await?;
    tracing::info!(user_id = %user_id, "Profile updated");
    Ok(profile)
}
