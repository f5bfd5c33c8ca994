//! Catalogue snapshot and store
//!
//! A `CatalogueSnapshot` bundles the index, the document bytes and the page
//! count as one immutable unit. The `CatalogueStore` holds the current one
//! behind a lock that is only taken to clone or swap the `Arc`, so a request
//! that grabbed a snapshot keeps a consistent view even while a new
//! catalogue is being swapped in.

use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use sha2::{Digest, Sha256};

use super::index::CatalogueIndex;
use crate::document::RenderResult;

/// One loaded catalogue
pub struct CatalogueSnapshot {
    index: CatalogueIndex,
    document: Arc<Vec<u8>>,
    total_pages: usize,
    source_name: Option<String>,
    fingerprint: String,
    loaded_at: DateTime<Utc>,
    /// Rendered pages, dropped together with the snapshot
    render_cache: Option<Mutex<LruCache<usize, Arc<RenderResult>>>>,
}

impl CatalogueSnapshot {
    pub fn new(
        index: CatalogueIndex,
        document: Arc<Vec<u8>>,
        total_pages: usize,
        source_name: Option<String>,
        render_cache_pages: usize,
    ) -> Self {
        let fingerprint = hex::encode(Sha256::digest(document.as_slice()));
        let render_cache =
            NonZeroUsize::new(render_cache_pages).map(|cap| Mutex::new(LruCache::new(cap)));

        Self {
            index,
            document,
            total_pages,
            source_name,
            fingerprint,
            loaded_at: Utc::now(),
            render_cache,
        }
    }

    pub fn index(&self) -> &CatalogueIndex {
        &self.index
    }

    /// Shared handle on the raw document bytes
    pub fn document(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.document)
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn indexed_keys(&self) -> usize {
        self.index.len()
    }

    /// File name given at upload, if any
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Hex SHA-256 of the document bytes
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn cached_render(&self, page: usize) -> Option<Arc<RenderResult>> {
        // LRU get needs exclusive access to update recency
        self.render_cache.as_ref()?.lock().get(&page).cloned()
    }

    pub fn cache_render(&self, page: usize, rendered: Arc<RenderResult>) {
        if let Some(cache) = &self.render_cache {
            cache.lock().put(page, rendered);
        }
    }

    /// Number of rendered pages currently cached
    pub fn cached_pages(&self) -> usize {
        self.render_cache.as_ref().map_or(0, |cache| cache.lock().len())
    }
}

/// Holder of the process-wide current catalogue
#[derive(Clone, Default)]
pub struct CatalogueStore {
    current: Arc<RwLock<Option<Arc<CatalogueSnapshot>>>>,
}

impl CatalogueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The snapshot to use for the rest of a request
    pub fn current(&self) -> Option<Arc<CatalogueSnapshot>> {
        self.current.read().clone()
    }

    /// Swap in a new catalogue, returning the one it replaced
    pub fn replace(&self, snapshot: CatalogueSnapshot) -> Option<Arc<CatalogueSnapshot>> {
        let mut current = self.current.write();
        current.replace(Arc::new(snapshot))
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageText;

    fn snapshot(text: &str, cache_pages: usize) -> CatalogueSnapshot {
        let pages = vec![PageText::new(1, text)];
        CatalogueSnapshot::new(
            CatalogueIndex::build(&pages),
            Arc::new(text.as_bytes().to_vec()),
            1,
            Some("catalogue.pdf".to_string()),
            cache_pages,
        )
    }

    fn rendered() -> Arc<RenderResult> {
        Arc::new(RenderResult {
            data: vec![1, 2, 3],
            width: 2,
            height: 2,
        })
    }

    #[test]
    fn test_store_starts_empty() {
        let store = CatalogueStore::new();
        assert!(!store.is_loaded());
        assert!(store.current().is_none());
    }

    #[test]
    fn test_replace_swaps_whole_snapshot() {
        let store = CatalogueStore::new();
        assert!(store.replace(snapshot("first", 4)).is_none());

        let held = store.current().unwrap();
        let previous = store.replace(snapshot("second", 4)).unwrap();

        assert_eq!(previous.fingerprint(), held.fingerprint());
        // A request holding the old snapshot still sees old index and bytes together
        assert_eq!(held.index().lookup("first"), Some(1));
        assert_eq!(held.document().as_slice(), b"first");

        let current = store.current().unwrap();
        assert_eq!(current.index().lookup("first"), None);
        assert_eq!(current.document().as_slice(), b"second");
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = snapshot("same bytes", 0);
        let b = snapshot("same bytes", 0);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
        assert_ne!(a.fingerprint(), snapshot("other bytes", 0).fingerprint());
    }

    #[test]
    fn test_render_cache() {
        let snap = snapshot("cached", 1);
        assert!(snap.cached_render(1).is_none());

        snap.cache_render(1, rendered());
        assert_eq!(snap.cached_render(1).unwrap().data, vec![1, 2, 3]);

        // Capacity 1 evicts the older page
        snap.cache_render(2, rendered());
        assert!(snap.cached_render(1).is_none());
        assert_eq!(snap.cached_pages(), 1);
    }

    #[test]
    fn test_render_cache_disabled() {
        let snap = snapshot("uncached", 0);
        snap.cache_render(1, rendered());
        assert!(snap.cached_render(1).is_none());
        assert_eq!(snap.cached_pages(), 0);
    }
}
