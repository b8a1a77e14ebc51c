use std::sync::Arc;

use cifan_db::store::RecordStore;

use crate::config::ServerConfig;
use crate::services::in_flight::InFlightActions;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Submission and profile storage (PostgreSQL or in-memory).
    pub store: Arc<dyn RecordStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Mutating actions currently running, keyed by record id.
    pub in_flight: Arc<InFlightActions>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
            in_flight: Arc::new(InFlightActions::default()),
        }
    }
}
