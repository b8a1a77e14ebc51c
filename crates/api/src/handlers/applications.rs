//! Handlers for the `/applications` resource.
//!
//! Errors are rendered in the request locale; the failing action picks the
//! message for store failures.

use axum::extract::{Path, Query, State};
use axum::Json;
use cifan_core::draft::ApplicationPatch;
use cifan_core::lifecycle::Action;
use cifan_core::listing::ApplicationCard;
use cifan_core::types::RecordId;
use serde::{Deserialize, Serialize};

use crate::error::LocalizedError;
use crate::middleware::auth::AuthUser;
use crate::middleware::json::LocalizedJson;
use crate::middleware::locale::RequestLocale;
use crate::response::DataResponse;
use crate::services::applications::{ApplicationDetail, ApplicationService};
use crate::state::AppState;

type LocalizedResult<T> = Result<T, LocalizedError>;

/// Request body for `POST /applications/{id}/submit`. A missing body is
/// an unconfirmed submit.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub confirmed: bool,
}

/// Query parameters for `DELETE /applications/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

/// Where the client navigates after a delete.
#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    pub redirect: String,
}

/// GET /api/v1/applications
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    RequestLocale(locale): RequestLocale,
) -> LocalizedResult<Json<DataResponse<Vec<ApplicationCard>>>> {
    let views = ApplicationService::from_state(&state)
        .list(&user.user_id)
        .await
        .map_err(|e| e.localized(locale, None))?;

    let cards = views
        .iter()
        .map(|view| ApplicationCard::from_view(view, locale))
        .collect();
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/v1/applications/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    RequestLocale(locale): RequestLocale,
    Path(id): Path<RecordId>,
) -> LocalizedResult<Json<ApplicationDetail>> {
    let detail = ApplicationService::from_state(&state)
        .detail(&id, &user.user_id)
        .await
        .map_err(|e| e.localized(locale, None))?;
    Ok(Json(detail))
}

/// GET /api/v1/applications/{id}/edit
pub async fn edit(
    State(state): State<AppState>,
    user: AuthUser,
    RequestLocale(locale): RequestLocale,
    Path(id): Path<RecordId>,
) -> LocalizedResult<Json<ApplicationDetail>> {
    let detail = ApplicationService::from_state(&state)
        .edit(&id, &user.user_id)
        .await
        .map_err(|e| e.localized(locale, Some(Action::EditToggle)))?;
    Ok(Json(detail))
}

/// PATCH /api/v1/applications/{id}
pub async fn save_draft(
    State(state): State<AppState>,
    user: AuthUser,
    RequestLocale(locale): RequestLocale,
    Path(id): Path<RecordId>,
    LocalizedJson(patch): LocalizedJson<ApplicationPatch>,
) -> LocalizedResult<Json<ApplicationDetail>> {
    let detail = ApplicationService::from_state(&state)
        .save_draft(&id, &user.user_id, patch)
        .await
        .map_err(|e| e.localized(locale, Some(Action::SaveDraft)))?;
    Ok(Json(detail))
}

/// POST /api/v1/applications/{id}/submit
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    RequestLocale(locale): RequestLocale,
    Path(id): Path<RecordId>,
    input: Option<LocalizedJson<SubmitRequest>>,
) -> LocalizedResult<Json<ApplicationDetail>> {
    let input = input.map(|LocalizedJson(body)| body).unwrap_or_default();
    let detail = ApplicationService::from_state(&state)
        .submit(&id, &user.user_id, input.confirmed)
        .await
        .map_err(|e| e.localized(locale, Some(Action::Submit)))?;
    Ok(Json(detail))
}

/// DELETE /api/v1/applications/{id}?confirm=true
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    RequestLocale(locale): RequestLocale,
    Path(id): Path<RecordId>,
    Query(params): Query<DeleteParams>,
) -> LocalizedResult<Json<RedirectResponse>> {
    let route = ApplicationService::from_state(&state)
        .delete(&id, &user.user_id, params.confirm)
        .await
        .map_err(|e| e.localized(locale, Some(Action::Delete)))?;
    Ok(Json(RedirectResponse {
        redirect: route.to_string(),
    }))
}
