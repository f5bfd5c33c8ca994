//! MuPDF backend against generated documents

mod common;

use std::sync::Arc;

use catalogue_server::catalogue::CatalogueIndex;
use catalogue_server::document::{
    DocumentError, DocumentParser, DocumentRenderer, RenderRequest,
};
use catalogue_server::formats::pdf::PdfDocumentHandler;
use catalogue_server::mupdf::{extract_page_text, page_dimensions, SafeDocument};

use common::{build_pdf, widget_catalogue, PAGE_HEIGHT, PAGE_WIDTH};

#[tokio::test]
async fn test_extracts_every_page_in_order() {
    let handler = PdfDocumentHandler::new();
    let extracted = handler
        .extract_pages(Arc::new(widget_catalogue()))
        .await
        .unwrap();

    assert_eq!(extracted.page_count, 3);
    let numbers: Vec<usize> = extracted.pages.iter().map(|p| p.page_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let first: Vec<String> = extracted.pages[0]
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    assert_eq!(first, vec!["WIDGET-001", "Ref-12345 Widget"]);
}

#[tokio::test]
async fn test_page_without_text_has_no_text_layer() {
    let handler = PdfDocumentHandler::new();
    let extracted = handler
        .extract_pages(Arc::new(build_pdf(&[&["COVER"], &[]])))
        .await
        .unwrap();

    assert_eq!(extracted.page_count, 2);
    assert!(extracted.pages[0].text.is_some());
    assert!(extracted.pages[1].text.is_none());
}

#[tokio::test]
async fn test_index_over_extracted_text() {
    let handler = PdfDocumentHandler::new();
    let extracted = handler
        .extract_pages(Arc::new(widget_catalogue()))
        .await
        .unwrap();
    let index = CatalogueIndex::build(&extracted.pages);

    assert_eq!(index.lookup("widget-001"), Some(1));
    assert_eq!(index.lookup("WIDGET-002"), Some(2));
    assert_eq!(index.lookup("gadget"), Some(3));
    assert_eq!(index.lookup("12345"), Some(1));
    assert_eq!(index.len(), 4);
}

#[tokio::test]
async fn test_render_doubles_native_size() {
    let handler = PdfDocumentHandler::new();
    let request = RenderRequest {
        page_number: 2,
        scale: 2.0,
    };
    let rendered = handler
        .render_page(Arc::new(widget_catalogue()), &request)
        .await
        .unwrap();

    assert_eq!(rendered.width, PAGE_WIDTH * 2);
    assert_eq!(rendered.height, PAGE_HEIGHT * 2);

    let image = image::load_from_memory(&rendered.data).unwrap();
    assert_eq!(image.width(), PAGE_WIDTH * 2);
    assert_eq!(image.height(), PAGE_HEIGHT * 2);
}

#[test]
fn test_one_open_serves_every_page_operation() {
    let bytes = widget_catalogue();
    let doc = SafeDocument::open(&bytes).unwrap();
    assert_eq!(doc.page_count(), 3);

    let texts = doc.map_pages(|_, page| extract_page_text(page)).unwrap();
    assert_eq!(texts.len(), 3);
    assert!(texts.iter().all(Option::is_some));

    let size = doc.with_page(3, page_dimensions).unwrap();
    assert_eq!(size.width, PAGE_WIDTH as f32);
    assert_eq!(size.height, PAGE_HEIGHT as f32);

    let second = doc
        .with_page(2, |page| extract_page_text(page))
        .unwrap()
        .unwrap();
    assert!(second.contains("WIDGET-002"));

    assert!(matches!(
        doc.with_page(0, page_dimensions),
        Err(DocumentError::PageOutOfRange { page: 0, .. })
    ));
}

#[tokio::test]
async fn test_render_out_of_range_page() {
    let handler = PdfDocumentHandler::new();
    let request = RenderRequest {
        page_number: 4,
        scale: 2.0,
    };
    let err = handler
        .render_page(Arc::new(widget_catalogue()), &request)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DocumentError::PageOutOfRange {
            page: 4,
            page_count: 3
        }
    ));
}

#[tokio::test]
async fn test_rejects_non_pdf() {
    let handler = PdfDocumentHandler::new();
    let err = handler
        .extract_pages(Arc::new(b"<html>not a catalogue</html>".to_vec()))
        .await
        .unwrap_err();

    assert!(matches!(err, DocumentError::NotPdf));
}
