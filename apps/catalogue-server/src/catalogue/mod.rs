//! Catalogue indexing and lookup
//!
//! One reference catalogue is loaded at a time. Loading extracts every
//! page's text and maps each normalized line to the first page it appears
//! on; searching resolves a query by substring containment and renders the
//! matched page on demand.
//!
//! # Usage
//!
//! ```rust,ignore
//! use catalogue_server::catalogue::CatalogueService;
//! use catalogue_server::formats::pdf::PdfDocumentHandler;
//!
//! let service = CatalogueService::new(Arc::new(PdfDocumentHandler::new()), config.catalogue);
//!
//! let summary = service.load(pdf_bytes, Some("catalogue.pdf".into())).await?;
//! let outcome = service.search("REF-12345").await?;
//! if let Some(page) = outcome.page {
//!     // outcome.image_base64 holds the page as PNG at 2x zoom
//! }
//! ```

mod error;
mod index;
mod service;
mod snapshot;

pub use error::CatalogueError;
pub use index::{normalize, CatalogueIndex};
pub use service::{
    CatalogueService, CatalogueStatus, LoadSummary, SearchOutcome, RENDER_ZOOM,
};
pub use snapshot::{CatalogueSnapshot, CatalogueStore};
