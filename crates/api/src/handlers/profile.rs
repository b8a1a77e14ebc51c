//! Handlers for the requester's `/profile`.

use axum::extract::State;
use axum::Json;
use cifan_core::lifecycle::Action;
use cifan_core::profile::{ProfileUpdate, UserProfile};

use crate::error::LocalizedError;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::LocalizedJson;
use crate::middleware::locale::RequestLocale;
use crate::response::DataResponse;
use crate::services::profile;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    RequestLocale(locale): RequestLocale,
) -> Result<Json<DataResponse<UserProfile>>, LocalizedError> {
    let profile = profile::get(state.store.as_ref(), &user.user_id)
        .await
        .map_err(|e| e.localized(locale, None))?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profile
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    RequestLocale(locale): RequestLocale,
    LocalizedJson(input): LocalizedJson<ProfileUpdate>,
) -> Result<Json<DataResponse<UserProfile>>, LocalizedError> {
    let profile = profile::update(state.store.as_ref(), &user.user_id, input)
        .await
        .map_err(|e| e.localized(locale, Some(Action::SaveDraft)))?;
    Ok(Json(DataResponse { data: profile }))
}
