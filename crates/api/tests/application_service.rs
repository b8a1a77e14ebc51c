//! Service-level behaviour of draft actions, without the HTTP layer.

use assert_matches::assert_matches;
use cifan_api::error::AppError;
use cifan_api::services::applications::ApplicationService;
use cifan_api::services::in_flight::InFlightActions;
use cifan_core::error::CoreError;
use cifan_core::lifecycle::{Action, ActionState};
use cifan_core::navigation::Route;
use cifan_db::store::{MemoryStore, RecordStore, StoredRecord};
use serde_json::json;

async fn store_with_draft() -> MemoryStore {
    let store = MemoryStore::new();
    let data = json!({
        "userId": "u1",
        "filmTitle": "X",
        "competitionCategory": "future",
        "status": "draft",
        "files": {}
    });
    store
        .put(StoredRecord::new("doc-1", data.as_object().unwrap().clone()))
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn concurrent_action_is_rejected_before_any_write() {
    let store = store_with_draft().await;
    let in_flight = InFlightActions::default();
    let service = ApplicationService::new(&store, &in_flight);
    let writes = store.write_count();

    let guard = in_flight.acquire("doc-1", Action::SaveDraft).unwrap();
    assert_matches!(
        service.submit("doc-1", "u1", true).await,
        Err(AppError::ActionInProgress { action: "save", .. })
    );
    assert_eq!(store.write_count(), writes);

    // The detail view reports the running action.
    let detail = service.detail("doc-1", "u1").await.unwrap();
    assert!(detail.affordances.processing);
    assert!(!detail.affordances.can_submit);

    drop(guard);
    assert!(service.submit("doc-1", "u1", true).await.is_ok());
    assert_eq!(in_flight.state("doc-1"), ActionState::Idle);
}

#[tokio::test]
async fn non_owner_is_forbidden_while_action_in_flight() {
    let store = store_with_draft().await;
    let in_flight = InFlightActions::default();
    let service = ApplicationService::new(&store, &in_flight);
    let writes = store.write_count();

    let _guard = in_flight.acquire("doc-1", Action::SaveDraft).unwrap();
    assert_matches!(
        service.delete("doc-1", "u2", true).await,
        Err(AppError::Core(CoreError::Forbidden(_)))
    );
    assert_matches!(
        service.submit("doc-1", "u2", true).await,
        Err(AppError::Core(CoreError::Forbidden(_)))
    );
    assert_eq!(store.write_count(), writes);
    assert_eq!(in_flight.state("doc-1"), ActionState::InFlight(Action::SaveDraft));
}

#[tokio::test]
async fn guard_is_released_after_refusal() {
    let store = store_with_draft().await;
    let in_flight = InFlightActions::default();
    let service = ApplicationService::new(&store, &in_flight);

    assert_matches!(
        service.delete("doc-1", "u2", true).await,
        Err(AppError::Core(CoreError::Forbidden(_)))
    );
    assert_eq!(in_flight.state("doc-1"), ActionState::Idle);

    assert_eq!(
        service.delete("doc-1", "u1", true).await.unwrap(),
        Route::MyApplications
    );
    assert_matches!(
        service.load("doc-1", "u1").await,
        Err(AppError::Core(CoreError::NotFound { .. }))
    );
}

#[tokio::test]
async fn submitted_record_stays_submitted() {
    let store = store_with_draft().await;
    let in_flight = InFlightActions::default();
    let service = ApplicationService::new(&store, &in_flight);

    let detail = service.submit("doc-1", "u1", true).await.unwrap();
    assert!(!detail.view.is_draft());
    let writes = store.write_count();

    assert_matches!(
        service.submit("doc-1", "u1", true).await,
        Err(AppError::Core(CoreError::Conflict(_)))
    );
    assert_matches!(
        service.edit("doc-1", "u1").await,
        Err(AppError::Core(CoreError::Conflict(_)))
    );
    assert_eq!(store.write_count(), writes);
}

#[tokio::test]
async fn listing_skips_records_that_fail_to_normalize() {
    let store = store_with_draft().await;
    let bad = json!({
        "userId": "u1",
        "filmTitle": "Broken",
        "category": "world",
        "status": "archived",
        "files": {}
    });
    store
        .put(StoredRecord::new("doc-bad", bad.as_object().unwrap().clone()))
        .await
        .unwrap();

    let in_flight = InFlightActions::default();
    let views = ApplicationService::new(&store, &in_flight)
        .list("u1")
        .await
        .unwrap();

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].id, "doc-1");
}
