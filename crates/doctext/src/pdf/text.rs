//! PDF text layer extraction.

use super::bindings::bind_pdfium;
use super::error::{PdfError, Result};
use crate::plugins::{PdfText, PdfTextLayer, Plugin};
use async_trait::async_trait;
use pdfium_render::prelude::*;

/// Read every page's embedded text, pages separated by a blank line.
pub fn extract_text_from_pdf(pdf_bytes: &[u8]) -> Result<PdfText> {
    let pdfium = Pdfium::new(bind_pdfium(PdfError::TextExtractionFailed, "text extraction")?);

    let document = pdfium
        .load_pdf_from_byte_slice(pdf_bytes, None)
        .map_err(|e| PdfError::from_load_error(e.to_string()))?;

    let pages = document.pages();
    let page_count = pages.len() as usize;
    let mut content = String::new();

    for (index, page) in pages.iter().enumerate() {
        let page_text = page
            .text()
            .map_err(|e| PdfError::TextExtractionFailed(format!("Page {}: {}", index + 1, e)))?
            .all();

        if index > 0 {
            content.push_str("\n\n");
        }
        content.push_str(&page_text);
    }

    Ok(PdfText {
        page_count,
        text: content,
    })
}

/// [`PdfTextLayer`] backed by pdfium.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumTextLayer;

impl Plugin for PdfiumTextLayer {
    fn name(&self) -> &str {
        "pdfium"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[async_trait]
impl PdfTextLayer for PdfiumTextLayer {
    async fn extract_text(&self, pdf: &[u8]) -> crate::Result<PdfText> {
        let bytes = pdf.to_vec();
        let text = tokio::task::spawn_blocking(move || extract_text_from_pdf(&bytes))
            .await
            .map_err(|e| crate::DoctextError::Other(format!("PDF text task panicked: {}", e)))??;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_non_pdf() {
        let result = PdfiumTextLayer.extract_text(b"definitely not a pdf").await;
        assert!(matches!(result, Err(crate::DoctextError::Extraction { .. })));
    }
}
