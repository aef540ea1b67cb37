//! Image preprocessing plugin trait.

use crate::Result;
use crate::plugins::Plugin;
use async_trait::async_trait;

/// Enhances an image before OCR.
///
/// The standard pipeline converts to greyscale, stretches contrast to the
/// full range and sharpens edges. Output is an encoded image again.
#[async_trait]
pub trait ImagePreprocessor: Plugin {
    async fn preprocess(&self, image: &[u8]) -> Result<Vec<u8>>;
}
