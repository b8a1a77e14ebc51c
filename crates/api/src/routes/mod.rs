pub mod applications;
pub mod health;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /applications                                    list (requester's own)
/// /applications/{id}                               get, save draft (PATCH), delete
/// /applications/{id}/edit                          get in edit mode
/// /applications/{id}/submit                        submit (POST)
///
/// /profile                                         get, update (PUT)
/// ```
///
/// Every route requires a Bearer token; the `sub` claim is the requester.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/applications", applications::router())
        .nest("/profile", profile::router())
}
