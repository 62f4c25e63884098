use std::sync::Arc;

use podsearch_core::{Config, SearchService, ShowStore};

/// Shared application state
pub struct AppState {
    config: Config,
    search: SearchService,
    store: Arc<dyn ShowStore>,
}

impl AppState {
    pub fn new(config: Config, search: SearchService, store: Arc<dyn ShowStore>) -> Self {
        Self {
            config,
            search,
            store,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn search(&self) -> &SearchService {
        &self.search
    }

    pub fn store(&self) -> &dyn ShowStore {
        self.store.as_ref()
    }
}
