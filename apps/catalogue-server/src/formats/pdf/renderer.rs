//! Page rasterization for PDF catalogues
//!
//! Pages are drawn without alpha, so they come out on white like a printed
//! page, and are encoded as PNG with the `image` crate.

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use image::{ImageFormat, RgbImage};
use mupdf::{Colorspace, Matrix, Page};

use crate::document::{
    DocumentError, DocumentRenderer, DocumentResult, RenderRequest, RenderResult,
};
use crate::mupdf::{page_dimensions, SafeDocument};

use super::PdfDocumentHandler;

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 4.0;

#[async_trait]
impl DocumentRenderer for PdfDocumentHandler {
    async fn render_page(
        &self,
        data: Arc<Vec<u8>>,
        request: &RenderRequest,
    ) -> DocumentResult<RenderResult> {
        let page_number = request.page_number;
        let zoom = request.scale.clamp(MIN_ZOOM, MAX_ZOOM);

        tokio::task::spawn_blocking(move || {
            SafeDocument::open(&data)?
                .with_page(page_number, |page| rasterize(page, page_number, zoom))
        })
        .await?
    }
}

fn rasterize(page: &Page, page_number: usize, zoom: f32) -> DocumentResult<RenderResult> {
    let native = page_dimensions(page)?;
    tracing::debug!(
        page = page_number,
        width_pt = native.width,
        height_pt = native.height,
        zoom,
        "Rasterizing page"
    );

    let pixmap = page
        .to_pixmap(&Matrix::new_scale(zoom, zoom), &Colorspace::device_rgb(), false, true)
        .map_err(|e| DocumentError::Rasterize(e.to_string()))?;

    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let image = to_rgb_image(pixmap.samples(), pixmap.n() as usize, width, height)?;

    Ok(RenderResult {
        data: encode_png(&image)?,
        width,
        height,
    })
}

/// Keep the first three components of each pixel
fn to_rgb_image(
    samples: &[u8],
    components: usize,
    width: u32,
    height: u32,
) -> DocumentResult<RgbImage> {
    if components < 3 {
        return Err(DocumentError::Rasterize(format!(
            "expected an RGB pixmap, got {} components",
            components
        )));
    }

    let pixel_count = width as usize * height as usize;
    let rgb: Vec<u8> = samples
        .chunks_exact(components)
        .take(pixel_count)
        .flat_map(|pixel| pixel[..3].iter().copied())
        .collect();

    RgbImage::from_raw(width, height, rgb).ok_or_else(|| {
        DocumentError::Encode(format!("pixmap too small for {}x{}", width, height))
    })
}

fn encode_png(image: &RgbImage) -> DocumentResult<Vec<u8>> {
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| DocumentError::Encode(e.to_string()))?;
    Ok(png)
}
