//! OCR engine plugin traits.

use crate::Result;
use crate::plugins::Plugin;
use async_trait::async_trait;
use std::sync::Arc;

/// Raw recognition output for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrOutput {
    pub text: String,
    /// Engine-reported confidence on a 0-100 scale, unrounded.
    pub confidence: f64,
}

/// A live OCR engine.
///
/// Engines are created once per batch by an [`OcrEngineFactory`], borrowed by
/// every item that needs recognition, and terminated exactly once when the
/// batch ends. Callers must not use an engine after `terminate` returns.
#[async_trait]
pub trait OcrEngine: Plugin {
    /// Recognize text in an encoded image (PNG, JPEG, TIFF, ...).
    ///
    /// # Errors
    ///
    /// - `DoctextError::Extraction` - the image could not be decoded or recognized
    async fn recognize(&self, image: &[u8]) -> Result<OcrOutput>;

    /// Release the engine's resources.
    async fn terminate(&self) -> Result<()>;

    /// Language code the engine was initialized with.
    fn language(&self) -> &str;
}

/// Creates OCR engines.
#[async_trait]
pub trait OcrEngineFactory: Plugin {
    /// Start an engine for `language`.
    ///
    /// # Errors
    ///
    /// - `DoctextError::EngineInit` - the engine could not start (missing
    ///   language data, unavailable library, ...)
    async fn create(&self, language: &str) -> Result<Arc<dyn OcrEngine>>;

    /// Whether this factory can produce engines at all.
    ///
    /// `false` for the stand-in used when the `ocr` feature is disabled. The
    /// dispatcher then runs without an engine instead of failing the batch.
    fn is_available(&self) -> bool {
        true
    }
}
