//! Page text extraction for PDF catalogues

use std::sync::Arc;

use async_trait::async_trait;

use crate::document::{
    DocumentBackend, DocumentError, DocumentParser, DocumentResult, ExtractedDocument, PageText,
};
use crate::mupdf::{extract_page_text, SafeDocument};

/// MuPDF-backed parser and renderer
///
/// Stateless: the catalogue owns the document bytes and hands them in on
/// every call, so one handler serves every loaded catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfDocumentHandler;

impl PdfDocumentHandler {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentBackend for PdfDocumentHandler {
    fn backend_name(&self) -> &str {
        "mupdf"
    }
}

#[async_trait]
impl DocumentParser for PdfDocumentHandler {
    async fn extract_pages(&self, data: Arc<Vec<u8>>) -> DocumentResult<ExtractedDocument> {
        // MuPDF work is CPU-bound
        tokio::task::spawn_blocking(move || extract_all_pages(data)).await?
    }
}

fn extract_all_pages(data: Arc<Vec<u8>>) -> DocumentResult<ExtractedDocument> {
    let doc = SafeDocument::open(&data)?;

    let pages = doc.map_pages(|page_number, page| {
        let text = extract_page_text(page).map_err(|e| DocumentError::Extraction {
            page: page_number,
            reason: e.to_string(),
        })?;
        Ok(PageText { page_number, text })
    })?;

    tracing::debug!(
        pages = pages.len(),
        with_text = pages.iter().filter(|p| p.text.is_some()).count(),
        "Extracted catalogue text"
    );

    Ok(ExtractedDocument {
        page_count: doc.page_count(),
        pages,
    })
}
