//! PDF page rasterization for OCR.

use super::bindings::bind_pdfium;
use super::error::{PdfError, Result};
use crate::plugins::{PdfRasterizer, Plugin};
use async_trait::async_trait;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use pdfium_render::prelude::*;
use std::io::Cursor;

/// Upper bound for either side of a rendered page, in pixels.
const MAX_IMAGE_DIMENSION: f32 = 65536.0;

fn target_size(points: f32, scale: f32) -> i32 {
    (points * scale).clamp(1.0, MAX_IMAGE_DIMENSION) as i32
}

/// Render every page at `scale` times its size in points, encoded as PNG.
pub fn render_pages_to_png(pdf_bytes: &[u8], scale: f32) -> Result<Vec<Vec<u8>>> {
    let pdfium = Pdfium::new(bind_pdfium(PdfError::RenderingFailed, "page rendering")?);

    let document = pdfium
        .load_pdf_from_byte_slice(pdf_bytes, None)
        .map_err(|e| PdfError::from_load_error(e.to_string()))?;

    let pages = document.pages();
    let mut images = Vec::with_capacity(pages.len() as usize);

    for (index, page) in pages.iter().enumerate() {
        let config = PdfRenderConfig::new()
            .set_target_width(target_size(page.width().value, scale))
            .set_target_height(target_size(page.height().value, scale))
            .rotate_if_landscape(PdfPageRenderRotation::None, false);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| PdfError::RenderingFailed(format!("Failed to render page {}: {}", index + 1, e)))?;

        let rgb_image = bitmap.as_image().into_rgb8();
        let (width, height) = rgb_image.dimensions();

        let mut encoded = Cursor::new(Vec::new());
        PngEncoder::new(&mut encoded)
            .write_image(&rgb_image, width, height, image::ColorType::Rgb8.into())
            .map_err(|e| PdfError::ImageEncodingFailed(format!("Page {}: {}", index + 1, e)))?;

        images.push(encoded.into_inner());
    }

    Ok(images)
}

/// [`PdfRasterizer`] backed by pdfium.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumRasterizer;

impl Plugin for PdfiumRasterizer {
    fn name(&self) -> &str {
        "pdfium"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[async_trait]
impl PdfRasterizer for PdfiumRasterizer {
    async fn render(&self, pdf: &[u8], scale: f32) -> crate::Result<Vec<Vec<u8>>> {
        let bytes = pdf.to_vec();
        let pages = tokio::task::spawn_blocking(move || render_pages_to_png(&bytes, scale))
            .await
            .map_err(|e| crate::DoctextError::Other(format!("PDF rendering task panicked: {}", e)))??;
        tracing::debug!(pages = pages.len(), scale, "Rendered PDF pages");
        Ok(pages)
    }
}
