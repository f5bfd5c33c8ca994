//! Thin layer over the `mupdf` bindings
//!
//! [`SafeDocument`] is one parsed document, opened inside the blocking task
//! that uses it; [`extract_page_text`] and [`page_dimensions`] read from a
//! loaded page.
//!
//! ```rust,ignore
//! let doc = SafeDocument::open(&pdf_bytes)?;
//! let texts = doc.map_pages(|_, page| extract_page_text(page))?;
//! let size = doc.with_page(1, page_dimensions)?;
//! ```

mod safe;
mod stext;

pub use safe::SafeDocument;
pub use stext::{extract_page_text, page_dimensions};
