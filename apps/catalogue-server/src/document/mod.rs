//! Document abstraction
//!
//! Backend-agnostic interfaces the catalogue uses to read and render the
//! loaded document.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  CatalogueService                       │
//! │        (index build, lookup, rendered page cache)       │
//! └─────────────────────────────────────────────────────────┘
//!                │                          │
//!                ▼                          ▼
//!   ┌────────────────────────┐  ┌────────────────────────┐
//!   │     DocumentParser     │  │    DocumentRenderer    │
//!   │  (page text extraction)│  │  (page rasterization)  │
//!   └────────────────────────┘  └────────────────────────┘
//!                │                          │
//!                └────────────┬─────────────┘
//!                             ▼
//!   ┌─────────────────────────────────────────────────────┐
//!   │           PdfDocumentHandler (MuPDF)                │
//!   └─────────────────────────────────────────────────────┘
//! ```

mod error;
mod traits;
mod types;

pub use error::{DocumentError, DocumentResult};
pub use traits::{DocumentBackend, DocumentParser, DocumentRenderer};
pub use types::{
    DocumentFormat, ExtractedDocument, PageDimensions, PageText, RenderRequest, RenderResult,
};
