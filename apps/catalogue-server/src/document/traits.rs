//! Document traits
//!
//! The catalogue treats text extraction and rasterization as black boxes.
//! These traits are the seams; `formats::pdf` provides the MuPDF
//! implementation.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::DocumentResult;
use super::types::{ExtractedDocument, RenderRequest, RenderResult};

/// Turns raw document bytes into per-page text
#[async_trait]
pub trait DocumentParser: Send + Sync {
    /// Parse the document and extract the text of every page, in page order.
    ///
    /// Fails with `NotPdf` or `Malformed` when the bytes are
    /// not a valid document.
    async fn extract_pages(&self, data: Arc<Vec<u8>>) -> DocumentResult<ExtractedDocument>;
}

/// Turns one page of a document into a PNG image
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Rasterize `request.page_number` (1-based) at `request.scale` zoom.
    async fn render_page(&self, data: Arc<Vec<u8>>, request: &RenderRequest)
        -> DocumentResult<RenderResult>;
}

/// A backend able to both parse and render
pub trait DocumentBackend: DocumentParser + DocumentRenderer {
    /// Backend name (for diagnostics)
    fn backend_name(&self) -> &str;
}
