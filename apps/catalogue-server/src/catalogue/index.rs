//! Text-to-page index
//!
//! Every non-blank line of extracted page text becomes a key (trimmed,
//! lowercased) mapped to the lowest page it appears on. Queries are
//! normalized the same way and resolved by substring containment.

use std::collections::HashMap;

use crate::document::PageText;

/// Normalize a line of page text or a user query into a key
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalized line -> first page it appears on
#[derive(Debug, Clone, Default)]
pub struct CatalogueIndex {
    entries: HashMap<String, usize>,
}

impl CatalogueIndex {
    /// Build an index from extracted pages
    ///
    /// When a key occurs on several pages the lowest page number is kept,
    /// whatever order the pages are supplied in.
    pub fn build<'a, I>(pages: I) -> Self
    where
        I: IntoIterator<Item = &'a PageText>,
    {
        let mut entries: HashMap<String, usize> = HashMap::new();

        for page in pages {
            for line in page.lines() {
                let key = normalize(line);
                if key.is_empty() {
                    continue;
                }
                entries
                    .entry(key)
                    .and_modify(|first| *first = (*first).min(page.page_number))
                    .or_insert(page.page_number);
            }
        }

        Self { entries }
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a raw query to a page
    ///
    /// A key matches when it contains the normalized query as a contiguous
    /// substring. Among all matching keys the lowest page number wins.
    pub fn lookup(&self, query: &str) -> Option<usize> {
        let needle = normalize(query);

        self.entries
            .iter()
            .filter(|(key, _)| key.contains(needle.as_str()))
            .map(|(_, &page)| page)
            .min()
    }
}
