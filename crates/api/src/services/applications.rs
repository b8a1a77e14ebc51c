//! Application detail, listing and draft actions.
//!
//! Every mutation follows the same sequence: read and normalize the record
//! (ownership check), claim the record's action slot, re-read it, gate the
//! action on the loaded status and confirmation, then write. Any refusal happens
//! before the store sees a write; a failed write leaves the record as it was.

use chrono::Utc;
use cifan_core::application::ApplicationView;
use cifan_core::draft::{submission_fields, ApplicationPatch};
use cifan_core::error::CoreError;
use cifan_core::lifecycle::{Action, Affordances, DetailPage};
use cifan_core::listing::{is_listable, sort_by_last_modified_desc};
use cifan_core::navigation::Route;
use cifan_core::normalize::{normalize, ENTITY_APPLICATION};
use cifan_core::types::RawRecord;
use cifan_db::store::RecordStore;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::services::in_flight::{InFlightActions, InFlightGuard};
use crate::state::AppState;

/// A normalized application together with the controls the client may show.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetail {
    #[serde(rename = "data")]
    pub view: ApplicationView,
    #[serde(rename = "actions")]
    pub affordances: Affordances,
}

impl ApplicationDetail {
    fn from_page(page: DetailPage) -> AppResult<Self> {
        let affordances = page.affordances();
        let view = page
            .into_view()
            .ok_or_else(|| AppError::InternalError("Detail page holds no application".into()))?;
        Ok(Self { view, affordances })
    }
}

/// Orchestrates reads and draft actions against the record store.
pub struct ApplicationService<'a> {
    store: &'a dyn RecordStore,
    in_flight: &'a InFlightActions,
}

impl<'a> ApplicationService<'a> {
    pub fn new(store: &'a dyn RecordStore, in_flight: &'a InFlightActions) -> Self {
        Self { store, in_flight }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(state.store.as_ref(), &state.in_flight)
    }

    /// Fetch and normalize one application for `user_id`.
    pub async fn load(&self, id: &str, user_id: &str) -> AppResult<ApplicationView> {
        let raw = self.store.get(id).await?;
        Ok(normalize(raw.as_ref(), id, user_id)?)
    }

    /// The detail page for one application.
    pub async fn detail(&self, id: &str, user_id: &str) -> AppResult<ApplicationDetail> {
        let mut page = DetailPage::new();
        page.begin_load();
        page.finish_load(Ok(self.load(id, user_id).await?));
        self.detail_from(id, page)
    }

    /// The detail page in edit mode. Refused for anything but a draft.
    pub async fn edit(&self, id: &str, user_id: &str) -> AppResult<ApplicationDetail> {
        let mut page = DetailPage::loaded(self.load(id, user_id).await?);
        page.toggle_edit()?;
        self.detail_from(id, page)
    }

    fn detail_from(&self, id: &str, page: DetailPage) -> AppResult<ApplicationDetail> {
        let mut detail = ApplicationDetail::from_page(page)?;
        if self.in_flight.state(id).is_in_flight() {
            detail.affordances = detail.affordances.with_processing();
        }
        Ok(detail)
    }

    /// All listable applications owned by `user_id`, newest first.
    ///
    /// Falls back to the unordered query when the ordered one fails and sorts
    /// in memory. Records that are incomplete or fail to normalize are
    /// skipped.
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<ApplicationView>> {
        let (records, ordered) = match self.store.list_by_owner_ordered(user_id).await {
            Ok(records) => (records, true),
            Err(err) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %err,
                    "Ordered listing failed, falling back to unordered query",
                );
                (self.store.list_by_owner(user_id).await?, false)
            }
        };

        let mut views: Vec<ApplicationView> = records
            .into_iter()
            .filter(|record| is_listable(&record.data))
            .filter_map(|record| match normalize(Some(&record.data), &record.id, user_id) {
                Ok(view) => Some(view),
                Err(err) => {
                    tracing::warn!(
                        application_id = %record.id,
                        error = %err,
                        "Skipping application that failed to normalize",
                    );
                    None
                }
            })
            .collect();

        if !ordered {
            sort_by_last_modified_desc(&mut views);
        }
        Ok(views)
    }

    /// Persist edited fields of a draft.
    pub async fn save_draft(
        &self,
        id: &str,
        user_id: &str,
        patch: ApplicationPatch,
    ) -> AppResult<ApplicationDetail> {
        let fields = patch.into_fields(Utc::now())?;
        let (_guard, page) = self.begin(id, user_id, Action::SaveDraft, false).await?;
        let view = self.persist(id, user_id, Action::SaveDraft, fields).await?;
        self.finish(page, Some(view))
    }

    /// Move a draft to `submitted`. Irreversible; needs `confirmed`.
    pub async fn submit(
        &self,
        id: &str,
        user_id: &str,
        confirmed: bool,
    ) -> AppResult<ApplicationDetail> {
        let (_guard, page) = self.begin(id, user_id, Action::Submit, confirmed).await?;
        let view = self
            .persist(id, user_id, Action::Submit, submission_fields(Utc::now()))
            .await?;
        tracing::info!(application_id = %id, user_id = %user_id, "Application submitted");
        self.finish(page, Some(view))
    }

    /// Delete a draft. Irreversible; needs `confirmed`. Returns where the
    /// client should navigate next.
    pub async fn delete(&self, id: &str, user_id: &str, confirmed: bool) -> AppResult<Route> {
        let (_guard, mut page) = self.begin(id, user_id, Action::Delete, confirmed).await?;

        let deleted = self.store.delete(id).await.map_err(|err| {
            tracing::warn!(application_id = %id, error = %err, "Delete failed");
            AppError::from(err)
        })?;
        if !deleted {
            return Err(not_found(id));
        }

        page.finish_action(Ok(None));
        tracing::info!(application_id = %id, user_id = %user_id, "Application deleted");
        Ok(Route::MyApplications)
    }

    /// Check ownership, claim the action slot, then gate `action` on the
    /// record as it stands once the slot is held.
    ///
    /// Only the owner ever learns that an action is in flight.
    async fn begin(
        &self,
        id: &str,
        user_id: &str,
        action: Action,
        confirmed: bool,
    ) -> AppResult<(InFlightGuard<'a>, DetailPage)> {
        self.load(id, user_id).await?;
        let guard = self.in_flight.acquire(id, action)?;
        let mut page = DetailPage::loaded(self.load(id, user_id).await?);
        page.begin_action(action, confirmed)?;
        Ok((guard, page))
    }

    /// Merge `fields` into the record and return the refreshed view.
    async fn persist(
        &self,
        id: &str,
        user_id: &str,
        action: Action,
        fields: RawRecord,
    ) -> AppResult<ApplicationView> {
        let updated = self.store.update_fields(id, fields).await.map_err(|err| {
            tracing::warn!(
                application_id = %id,
                action = action.name(),
                error = %err,
                "Write failed, record left unchanged",
            );
            AppError::from(err)
        })?;
        if !updated {
            return Err(not_found(id));
        }
        self.load(id, user_id).await
    }

    fn finish(
        &self,
        mut page: DetailPage,
        view: Option<ApplicationView>,
    ) -> AppResult<ApplicationDetail> {
        page.finish_action(Ok(view));
        ApplicationDetail::from_page(page)
    }
}

fn not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_APPLICATION,
        id: id.to_string(),
    })
}
