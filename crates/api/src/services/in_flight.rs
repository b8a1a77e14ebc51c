//! Per-record action guard.
//!
//! At most one save, submit or delete runs against a record at a time. A
//! second request for the same record is rejected before touching the
//! store. The slot is released when the [`InFlightGuard`] drops, whether the
//! action succeeded, failed or the request was cancelled.

use std::collections::HashMap;
use std::sync::Mutex;

use cifan_core::lifecycle::{Action, ActionState};
use cifan_core::types::RecordId;

use crate::error::AppError;

/// Registry of records with a mutating action in flight.
#[derive(Debug, Default)]
pub struct InFlightActions {
    active: Mutex<HashMap<RecordId, Action>>,
}

impl InFlightActions {
    /// Claim the action slot for `id`.
    pub fn acquire(&self, id: &str, action: Action) -> Result<InFlightGuard<'_>, AppError> {
        let mut active = self.lock();
        if let Some(current) = active.get(id) {
            tracing::debug!(
                application_id = %id,
                current = current.name(),
                rejected = action.name(),
                "Action already in flight",
            );
            return Err(AppError::ActionInProgress {
                id: id.to_string(),
                action: current.name(),
            });
        }
        active.insert(id.to_string(), action);
        Ok(InFlightGuard {
            registry: self,
            id: id.to_string(),
        })
    }

    /// Current action state of `id`.
    pub fn state(&self, id: &str) -> ActionState {
        self.lock()
            .get(id)
            .map_or(ActionState::Idle, |action| ActionState::InFlight(*action))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<RecordId, Action>> {
        // Entries are inserted and removed whole; a poisoned map is still consistent.
        self.active
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Releases the record's action slot on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    registry: &'a InFlightActions,
    id: RecordId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.id);
    }
}
