//! Image OCR strategy.

use crate::Result;
use crate::plugins::{ImagePreprocessor, OcrEngine};
use crate::text::trim_text;

/// Recognized text of a single image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageExtraction {
    pub text: String,
    /// Rounded to the nearest integer, 0-100.
    pub confidence: u8,
}

/// Round an engine confidence to an integer percentage.
///
/// Values outside 0-100 are clamped; non-finite values count as 0.
pub fn round_confidence(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// Run OCR over one encoded image, optionally preprocessing it first.
///
/// # Errors
///
/// - `DoctextError::Extraction` - preprocessing or recognition failed
pub async fn extract_image(
    image: &[u8],
    engine: &dyn OcrEngine,
    preprocessor: &dyn ImagePreprocessor,
    preprocess: bool,
) -> Result<ImageExtraction> {
    let enhanced;
    let input = if preprocess {
        enhanced = preprocessor
            .preprocess(image)
            .await
            .map_err(|e| e.into_extraction("Image preprocessing failed"))?;
        enhanced.as_slice()
    } else {
        image
    };

    let output = engine
        .recognize(input)
        .await
        .map_err(|e| e.into_extraction("OCR recognition failed"))?;

    let confidence = round_confidence(output.confidence);
    tracing::debug!(
        engine = engine.name(),
        preprocess,
        confidence,
        chars = output.text.len(),
        "Recognized image"
    );

    Ok(ImageExtraction {
        text: trim_text(&output.text).to_string(),
        confidence,
    })
}
