//! PDF backend plugin traits.

use crate::Result;
use crate::plugins::Plugin;
use async_trait::async_trait;

/// Embedded text of a PDF.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfText {
    pub page_count: usize,
    /// All pages' text, pages separated by a blank line.
    pub text: String,
}

/// Reads the embedded text layer of a PDF.
#[async_trait]
pub trait PdfTextLayer: Plugin {
    /// Open the document, count its pages and concatenate their text.
    ///
    /// # Errors
    ///
    /// - `DoctextError::Extraction` - the buffer is not a readable PDF
    async fn extract_text(&self, pdf: &[u8]) -> Result<PdfText>;
}

/// Renders PDF pages to encoded images.
#[async_trait]
pub trait PdfRasterizer: Plugin {
    /// Render every page at `scale` times its size in points.
    ///
    /// Returns one encoded image per page, in page order. A document without
    /// pages yields an empty vector.
    async fn render(&self, pdf: &[u8], scale: f32) -> Result<Vec<Vec<u8>>>;
}
