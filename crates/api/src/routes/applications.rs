//! Route definitions for the `/applications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// GET    /                   -> list
/// GET    /{id}               -> get_by_id
/// PATCH  /{id}               -> save_draft
/// DELETE /{id}?confirm=true  -> delete
/// GET    /{id}/edit          -> edit
/// POST   /{id}/submit        -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(applications::list))
        .route(
            "/{id}",
            get(applications::get_by_id)
                .patch(applications::save_draft)
                .delete(applications::delete),
        )
        .route("/{id}/edit", get(applications::edit))
        .route("/{id}/submit", post(applications::submit))
}
