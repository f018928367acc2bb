use axum::extract::FromRef;
use std::sync::Arc;

use crate::cache::DatasetCache;
use crate::session::SessionStore;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<Arc<DatasetCache>>`
/// or `State<SessionStore>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub datasets: Arc<DatasetCache>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(datasets: Arc<DatasetCache>) -> Self {
        Self {
            datasets,
            sessions: SessionStore::new(),
        }
    }
}
