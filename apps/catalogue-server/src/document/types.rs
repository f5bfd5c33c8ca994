//! Core document types
//!
//! Backend-agnostic types exchanged between the catalogue and the
//! extraction/rasterization engines.

/// How far into the buffer the `%PDF` header may appear.
///
/// Readers tolerate leading garbage before the header, so we do too.
const PDF_HEADER_SEARCH_WINDOW: usize = 1024;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Formats the backends understand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
}

impl DocumentFormat {
    /// Sniff the format from the leading bytes
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        let window = &bytes[..bytes.len().min(PDF_HEADER_SEARCH_WINDOW)];
        window
            .windows(PDF_MAGIC.len())
            .any(|w| w == PDF_MAGIC)
            .then_some(Self::Pdf)
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
        }
    }
}

/// Extracted text of a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-based page number
    pub page_number: usize,
    /// Page text, `None` when the page has no extractable text layer
    pub text: Option<String>,
}

impl PageText {
    pub fn new(page_number: usize, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: Some(text.into()),
        }
    }

    /// A page without a text layer (scanned image, blank page)
    pub fn empty(page_number: usize) -> Self {
        Self {
            page_number,
            text: None,
        }
    }

    /// Raw lines of the page, in reading order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.as_deref().unwrap_or_default().split('\n')
    }
}

/// Result of running the text extractor over a whole document
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Total number of pages in the document
    pub page_count: usize,
    /// Per-page text, ordered by page number
    pub pages: Vec<PageText>,
}

/// Page size in points (72 points = 1 inch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: f32,
    pub height: f32,
}

/// Render request
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// 1-based page number
    pub page_number: usize,
    /// Linear zoom relative to the native page size
    pub scale: f32,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            scale: 1.0,
        }
    }
}

/// Render result, always PNG encoded
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// Encoded PNG bytes
    pub data: Vec<u8>,
    /// Rendered dimensions in pixels
    pub width: u32,
    pub height: u32,
}
