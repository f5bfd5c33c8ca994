//! MuPDF backend for PDF catalogues
//!
//! [`PdfDocumentHandler`] implements both document traits: `parser` pulls
//! line text from every page, `renderer` rasterizes one page to PNG. Each
//! call runs on the blocking pool and goes through
//! [`SafeDocument`](crate::mupdf::SafeDocument).

mod parser;
mod renderer;

pub use parser::PdfDocumentHandler;
