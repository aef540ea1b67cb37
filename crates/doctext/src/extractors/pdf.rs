//! PDF strategy: text layer first, OCR when the text layer is too thin.
//!
//! | strategy | text layer | OCR            |
//! |----------|------------|----------------|
//! | `text`   | yes        | no             |
//! | `ocr`    | no         | yes            |
//! | `auto`   | yes        | when too short |
//!
//! Under `auto`, a trimmed text layer of at least `min_text_length`
//! characters short-circuits and the rasterizer is never called.

use crate::Result;
use crate::extractors::image::{extract_image, round_confidence};
use crate::plugins::{ExtractionBackends, OcrEngine};
use crate::text::{text_length, trim_text};
use crate::types::{ExtractionMethod, PdfStrategy};

/// Parameters of one PDF extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfExtractionOptions {
    pub strategy: PdfStrategy,
    pub preprocess: bool,
    pub render_scale: f32,
    pub min_text_length: usize,
}

impl Default for PdfExtractionOptions {
    fn default() -> Self {
        Self {
            strategy: PdfStrategy::Auto,
            preprocess: false,
            render_scale: 2.0,
            min_text_length: 50,
        }
    }
}

/// Outcome of the PDF strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfExtraction {
    pub text: String,
    pub page_count: usize,
    /// Present only when `method` is [`ExtractionMethod::PdfOcr`].
    pub confidence: Option<u8>,
    pub method: ExtractionMethod,
}

impl PdfExtraction {
    fn text_layer(text: String, page_count: usize) -> Self {
        Self {
            text,
            page_count,
            confidence: None,
            method: ExtractionMethod::PdfText,
        }
    }
}

/// Extract text from a PDF.
///
/// `engine` is `None` when the caller has no OCR engine; the strategy then
/// returns whatever the text layer produced. A rasterizer that yields no
/// pages also falls back to the text-layer result.
pub async fn extract_pdf(
    content: &[u8],
    options: &PdfExtractionOptions,
    engine: Option<&dyn OcrEngine>,
    backends: &ExtractionBackends,
) -> Result<PdfExtraction> {
    let mut text = String::new();
    let mut page_count = 0;

    if options.strategy.reads_text_layer() {
        let layer = backends
            .pdf_text
            .extract_text(content)
            .await
            .map_err(|e| e.into_extraction("PDF text extraction failed"))?;

        page_count = layer.page_count;
        text = trim_text(&layer.text).to_string();

        let length = text_length(&text);
        tracing::debug!(
            page_count,
            text_length = length,
            threshold = options.min_text_length,
            "Read PDF text layer"
        );

        if options.strategy == PdfStrategy::Auto && length >= options.min_text_length {
            return Ok(PdfExtraction::text_layer(text, page_count));
        }
    }

    if !options.strategy.may_use_ocr() {
        return Ok(PdfExtraction::text_layer(text, page_count));
    }

    let Some(engine) = engine else {
        tracing::debug!("No OCR engine available, keeping text layer result");
        return Ok(PdfExtraction::text_layer(text, page_count));
    };

    let pages = backends
        .pdf_rasterizer
        .render(content, options.render_scale)
        .await
        .map_err(|e| e.into_extraction("Failed to render PDF pages"))?;

    if pages.is_empty() {
        tracing::warn!("PDF rendered to zero pages, keeping text layer result");
        return Ok(PdfExtraction::text_layer(text, page_count));
    }

    let mut page_texts = Vec::with_capacity(pages.len());
    let mut confidence_total = 0u32;

    for (index, page) in pages.iter().enumerate() {
        let recognized = extract_image(page, engine, backends.preprocessor.as_ref(), options.preprocess).await?;
        tracing::debug!(page = index + 1, confidence = recognized.confidence, "Recognized PDF page");
        confidence_total += u32::from(recognized.confidence);
        page_texts.push(recognized.text);
    }

    let average = f64::from(confidence_total) / pages.len() as f64;

    Ok(PdfExtraction {
        text: trim_text(&page_texts.join("\n\n")).to_string(),
        page_count: pages.len(),
        confidence: Some(round_confidence(average)),
        method: ExtractionMethod::PdfOcr,
    })
}
