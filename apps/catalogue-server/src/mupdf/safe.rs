//! One opened MuPDF document, scoped to a single operation
//!
//! `fz_context` is not thread-safe, so a `SafeDocument` is created inside
//! the blocking task that uses it and dropped before the task returns. The
//! shared byte buffer is the only thing kept between operations; each
//! operation parses it exactly once.

use mupdf::{Document, Page};

use crate::document::{DocumentError, DocumentFormat, DocumentResult};

/// A PDF that MuPDF has opened, with its page count
pub struct SafeDocument {
    doc: Document,
    page_count: usize,
}

impl SafeDocument {
    /// Validate `data` as a PDF, open it and read its page count
    pub fn open(data: &[u8]) -> DocumentResult<Self> {
        if DocumentFormat::detect(data) != Some(DocumentFormat::Pdf) {
            return Err(DocumentError::NotPdf);
        }

        let doc = Document::from_bytes(data, DocumentFormat::Pdf.mime_type())
            .map_err(|e| DocumentError::Malformed(e.to_string()))?;
        let raw_count = doc
            .page_count()
            .map_err(|e| DocumentError::Malformed(e.to_string()))?;
        let page_count = usize::try_from(raw_count)
            .map_err(|_| DocumentError::Malformed(format!("negative page count {}", raw_count)))?;

        Ok(Self { doc, page_count })
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Visit every page in order, collecting one result per page
    ///
    /// A page MuPDF cannot load makes the document `Malformed`.
    pub fn map_pages<F, R>(&self, mut f: F) -> DocumentResult<Vec<R>>
    where
        F: FnMut(usize, &Page) -> DocumentResult<R>,
    {
        let mut results = Vec::with_capacity(self.page_count);

        for page_number in 1..=self.page_count {
            let page = self.doc.load_page((page_number - 1) as i32).map_err(|e| {
                DocumentError::Malformed(format!("page {} failed to load: {}", page_number, e))
            })?;
            results.push(f(page_number, &page)?);
        }

        Ok(results)
    }

    /// Run `f` against a single 1-based page
    pub fn with_page<F, R>(&self, page_number: usize, f: F) -> DocumentResult<R>
    where
        F: FnOnce(&Page) -> DocumentResult<R>,
    {
        if page_number == 0 || page_number > self.page_count {
            return Err(DocumentError::PageOutOfRange {
                page: page_number,
                page_count: self.page_count,
            });
        }

        let page = self.doc.load_page((page_number - 1) as i32)?;
        f(&page)
    }
}
