//! Errors from the extraction and rasterization engines

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    /// No `%PDF` header near the start of the bytes
    #[error("Not a PDF document")]
    NotPdf,

    /// Has a PDF header but MuPDF cannot make sense of it
    #[error("Malformed PDF: {0}")]
    Malformed(String),

    /// 1-based page outside the document
    #[error("Page {page} out of range (document has {page_count} pages)")]
    PageOutOfRange { page: usize, page_count: usize },

    #[error("Text extraction failed on page {page}: {reason}")]
    Extraction { page: usize, reason: String },

    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// Any other MuPDF failure
    #[error("MuPDF: {0}")]
    Engine(String),

    /// The blocking worker panicked or was cancelled
    #[error("Worker task failed: {0}")]
    Worker(String),
}

pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

impl From<mupdf::Error> for DocumentError {
    fn from(err: mupdf::Error) -> Self {
        Self::Engine(err.to_string())
    }
}

impl From<tokio::task::JoinError> for DocumentError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Worker(err.to_string())
    }
}
