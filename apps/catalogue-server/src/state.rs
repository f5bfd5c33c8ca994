//! Application state management

use std::sync::Arc;

use crate::catalogue::CatalogueService;
use crate::config::Config;
use crate::document::DocumentBackend;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    catalogue: CatalogueService,
}

impl AppState {
    /// Create a new application state around a document backend
    ///
    /// No catalogue is loaded until the first upload.
    pub fn new(config: Config, backend: Arc<dyn DocumentBackend>) -> Self {
        let catalogue = CatalogueService::new(backend, config.catalogue.clone());

        Self {
            inner: Arc::new(AppStateInner { config, catalogue }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the catalogue service
    pub fn catalogue(&self) -> &CatalogueService {
        &self.inner.catalogue
    }
}
