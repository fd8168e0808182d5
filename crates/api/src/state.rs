use std::sync::Arc;

use clearcare_core::coaching::{OpenerService, PracticeService};
use clearcare_core::completion::TextCompletion;
use clearcare_core::store::RecordStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Conversation persistence (Postgres or in-memory).
    pub store: Arc<dyn RecordStore>,
    pub opener: OpenerService,
    pub practice: PracticeService,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        completion: Arc<dyn TextCompletion>,
        config: ServerConfig,
    ) -> Self {
        Self {
            store,
            opener: OpenerService::new(Arc::clone(&completion)),
            practice: PracticeService::new(completion),
            config: Arc::new(config),
        }
    }
}
