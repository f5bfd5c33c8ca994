//! Catalogue error types

use axum::http::StatusCode;
use thiserror::Error;

use crate::document::DocumentError;

/// Errors surfaced by catalogue load and search
///
/// There is no "not found" variant: a search without a match returns a
/// normal outcome.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// Load called without any document bytes
    #[error("No catalogue file provided")]
    EmptyUpload,

    /// The multipart body could not be read
    #[error("Failed to read upload: {0}")]
    InvalidUpload(String),

    /// Search request without a usable reference parameter
    #[error("Invalid search request: {0}")]
    InvalidQuery(String),

    /// Bytes are not a valid document; the previous catalogue is kept
    #[error("Failed to parse catalogue: {0}")]
    Parse(#[source] DocumentError),

    /// Search attempted before any successful load
    #[error("No catalogue loaded. Upload one before searching")]
    NotIndexed,

    /// The page matched but could not be rasterized
    #[error("Failed to render page {page}: {source}")]
    Render {
        page: usize,
        #[source]
        source: DocumentError,
    },

    /// Parsing or rendering exceeded its time budget
    #[error("{operation} timed out after {seconds} seconds")]
    Timeout {
        operation: &'static str,
        seconds: u64,
    },

    /// Blocking task failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogueError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyUpload => StatusCode::BAD_REQUEST,
            Self::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Parse(_) => StatusCode::BAD_REQUEST,
            Self::NotIndexed => StatusCode::BAD_REQUEST,
            Self::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyUpload => "EMPTY_UPLOAD",
            Self::InvalidUpload(_) => "INVALID_UPLOAD",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::Parse(_) => "PARSE_ERROR",
            Self::NotIndexed => "NOT_INDEXED",
            Self::Render { .. } => "RENDER_ERROR",
            Self::Timeout { .. } => "TIMEOUT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
