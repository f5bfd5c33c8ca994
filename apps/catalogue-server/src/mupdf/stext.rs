//! Reading text and geometry off a loaded page

use mupdf::{Page, TextPageOptions};

use crate::document::{DocumentResult, PageDimensions};

/// Page text with one `\n`-terminated line per MuPDF text line
///
/// `None` means the page has no text layer at all (scans, blank pages).
pub fn extract_page_text(page: &Page) -> DocumentResult<Option<String>> {
    let structured = page.to_text_page(TextPageOptions::empty())?;
    let mut out = String::new();
    let mut any_glyph = false;

    for block in structured.blocks() {
        for line in block.lines() {
            for c in line.chars().filter_map(|ch| ch.char()) {
                out.push(c);
                any_glyph = true;
            }
            out.push('\n');
        }
    }

    Ok(any_glyph.then_some(out))
}

/// Native page size in points
pub fn page_dimensions(page: &Page) -> DocumentResult<PageDimensions> {
    let rect = page.bounds()?;
    Ok(PageDimensions {
        width: rect.x1 - rect.x0,
        height: rect.y1 - rect.y0,
    })
}
