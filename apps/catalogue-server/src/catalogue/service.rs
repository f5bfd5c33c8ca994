//! Catalogue service
//!
//! Orchestrates the three catalogue operations on top of the document
//! backend:
//!
//! - `load`: extract text, build the index, swap in a new snapshot
//! - `status`: describe the current snapshot
//! - `search`: resolve a query and lazily render the matched page
//!
//! Every request works on the one snapshot it acquired at the start, so a
//! concurrent load never mixes an old index with new document bytes.

use std::sync::Arc;
use std::time::Instant;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use tokio::time::timeout;

use super::error::CatalogueError;
use super::index::CatalogueIndex;
use super::snapshot::{CatalogueSnapshot, CatalogueStore};
use crate::config::CatalogueConfig;
use crate::document::{DocumentBackend, DocumentError, RenderRequest, RenderResult};

/// Linear zoom applied when rasterizing a matched page
pub const RENDER_ZOOM: f32 = 2.0;

/// Outcome of a successful load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub total_pages: usize,
    pub indexed_keys: usize,
    pub fingerprint: String,
    /// Whether a previously loaded catalogue was replaced
    pub replaced_previous: bool,
}

/// What is currently loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueStatus {
    Empty,
    Loaded {
        total_pages: usize,
        indexed_keys: usize,
        source_name: Option<String>,
        fingerprint: String,
        loaded_at: DateTime<Utc>,
    },
}

/// Result of a search; a miss is a normal outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Query as given by the caller, not normalized
    pub query: String,
    pub page: Option<usize>,
    pub total_pages: Option<usize>,
    /// Base64 PNG of the matched page
    pub image_base64: Option<String>,
}

impl SearchOutcome {
    fn not_found(query: &str) -> Self {
        Self {
            query: query.to_string(),
            page: None,
            total_pages: None,
            image_base64: None,
        }
    }

    pub fn found(&self) -> bool {
        self.page.is_some()
    }
}

/// Catalogue operations shared by all request handlers
#[derive(Clone)]
pub struct CatalogueService {
    store: CatalogueStore,
    backend: Arc<dyn DocumentBackend>,
    config: CatalogueConfig,
}

impl CatalogueService {
    pub fn new(backend: Arc<dyn DocumentBackend>, config: CatalogueConfig) -> Self {
        tracing::debug!("Catalogue service using '{}' backend", backend.backend_name());
        Self {
            store: CatalogueStore::new(),
            backend,
            config,
        }
    }

    pub fn store(&self) -> &CatalogueStore {
        &self.store
    }

    /// Index a document and make it the current catalogue
    ///
    /// The new snapshot is built completely before the swap; on any error
    /// the previous catalogue stays in place.
    pub async fn load(
        &self,
        data: Vec<u8>,
        source_name: Option<String>,
    ) -> Result<LoadSummary, CatalogueError> {
        if data.is_empty() {
            return Err(CatalogueError::EmptyUpload);
        }

        let started = Instant::now();
        let data = Arc::new(data);
        let byte_len = data.len();

        let extracted = timeout(
            self.config.parse_timeout,
            self.backend.extract_pages(Arc::clone(&data)),
        )
        .await
        .map_err(|_| CatalogueError::Timeout {
            operation: "parse",
            seconds: self.config.parse_timeout.as_secs(),
        })?
        .map_err(|e| match e {
            DocumentError::Worker(reason) => CatalogueError::Internal(reason),
            other => CatalogueError::Parse(other),
        })?;

        // Hashing and indexing a large catalogue is CPU-bound too
        let cache_pages = self.config.render_cache_pages;
        let snapshot = tokio::task::spawn_blocking(move || {
            let index = CatalogueIndex::build(&extracted.pages);
            CatalogueSnapshot::new(index, data, extracted.page_count, source_name, cache_pages)
        })
        .await
        .map_err(|e| CatalogueError::Internal(format!("Task join error: {}", e)))?;

        let summary = LoadSummary {
            total_pages: snapshot.total_pages(),
            indexed_keys: snapshot.indexed_keys(),
            fingerprint: snapshot.fingerprint().to_string(),
            replaced_previous: false,
        };

        let previous = self.store.replace(snapshot);

        tracing::info!(
            total_pages = summary.total_pages,
            indexed_keys = summary.indexed_keys,
            bytes = byte_len,
            elapsed_ms = started.elapsed().as_millis() as u64,
            replaced = previous.is_some(),
            "Catalogue indexed"
        );

        Ok(LoadSummary {
            replaced_previous: previous.is_some(),
            ..summary
        })
    }

    pub fn status(&self) -> CatalogueStatus {
        match self.store.current() {
            None => CatalogueStatus::Empty,
            Some(snapshot) => CatalogueStatus::Loaded {
                total_pages: snapshot.total_pages(),
                indexed_keys: snapshot.indexed_keys(),
                source_name: snapshot.source_name().map(String::from),
                fingerprint: snapshot.fingerprint().to_string(),
                loaded_at: snapshot.loaded_at(),
            },
        }
    }

    /// Find the first page containing `query` and render it
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, CatalogueError> {
        let snapshot = self.store.current().ok_or(CatalogueError::NotIndexed)?;

        let Some(page) = snapshot.index().lookup(query) else {
            tracing::debug!("No match for '{}'", query);
            return Ok(SearchOutcome::not_found(query));
        };

        tracing::debug!("'{}' found on page {}", query, page);

        let rendered = self.render_page(&snapshot, page).await?;

        Ok(SearchOutcome {
            query: query.to_string(),
            page: Some(page),
            total_pages: Some(snapshot.total_pages()),
            image_base64: Some(BASE64.encode(&rendered.data)),
        })
    }

    /// Render a page of the given snapshot (with caching)
    async fn render_page(
        &self,
        snapshot: &CatalogueSnapshot,
        page: usize,
    ) -> Result<Arc<RenderResult>, CatalogueError> {
        if let Some(hit) = snapshot.cached_render(page) {
            return Ok(hit);
        }

        let request = RenderRequest {
            page_number: page,
            scale: RENDER_ZOOM,
        };

        let rendered = timeout(
            self.config.render_timeout,
            self.backend.render_page(snapshot.document(), &request),
        )
        .await
        .map_err(|_| CatalogueError::Timeout {
            operation: "render",
            seconds: self.config.render_timeout.as_secs(),
        })?
        .map_err(|source| {
            tracing::error!("Failed to render page {}: {}", page, source);
            CatalogueError::Render { page, source }
        })?;

        let rendered = Arc::new(rendered);
        snapshot.cache_render(page, Arc::clone(&rendered));

        Ok(rendered)
    }
}
