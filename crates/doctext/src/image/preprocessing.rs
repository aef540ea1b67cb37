//! Greyscale, contrast normalization and sharpening.

use crate::plugins::{ImagePreprocessor, Plugin};
use crate::{DoctextError, Result};
use async_trait::async_trait;
use image::codecs::png::PngEncoder;
use image::{GrayImage, ImageEncoder};
use std::io::Cursor;

/// Stretch luminance so the darkest pixel becomes 0 and the brightest 255.
///
/// Flat images (a single luminance value) are returned unchanged.
pub fn stretch_contrast(mut gray: GrayImage) -> GrayImage {
    let (min, max) = gray
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p.0[0]), hi.max(p.0[0])));

    if max <= min {
        return gray;
    }

    let range = f32::from(max - min);
    for pixel in gray.pixels_mut() {
        let value = f32::from(pixel.0[0] - min) * 255.0 / range;
        pixel.0[0] = value.round().clamp(0.0, 255.0) as u8;
    }

    gray
}

/// Decode, enhance and re-encode an image as greyscale PNG.
pub fn enhance_for_ocr(image_bytes: &[u8], sigma: f32, threshold: i32) -> Result<Vec<u8>> {
    let img = image::load_from_memory(image_bytes)
        .map_err(|e| DoctextError::extraction_with_source("Failed to decode image for preprocessing", e))?;

    let gray = stretch_contrast(img.to_luma8());
    let sharpened = image::imageops::unsharpen(&gray, sigma, threshold);
    let (width, height) = sharpened.dimensions();

    let mut encoded = Cursor::new(Vec::new());
    PngEncoder::new(&mut encoded)
        .write_image(sharpened.as_raw(), width, height, image::ExtendedColorType::L8)
        .map_err(|e| DoctextError::extraction_with_source("Failed to encode preprocessed image", e))?;

    Ok(encoded.into_inner())
}

/// Default [`ImagePreprocessor`] backed by the `image` crate.
#[derive(Debug, Clone, Copy)]
pub struct OcrImagePreprocessor {
    /// Gaussian sigma of the unsharp mask.
    pub sigma: f32,
    /// Minimum brightness difference the unsharp mask will sharpen.
    pub threshold: i32,
}

impl Default for OcrImagePreprocessor {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            threshold: 2,
        }
    }
}

impl Plugin for OcrImagePreprocessor {
    fn name(&self) -> &str {
        "image-preprocessor"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[async_trait]
impl ImagePreprocessor for OcrImagePreprocessor {
    async fn preprocess(&self, image: &[u8]) -> Result<Vec<u8>> {
        let bytes = image.to_vec();
        let Self { sigma, threshold } = *self;

        tokio::task::spawn_blocking(move || enhance_for_ocr(&bytes, sigma, threshold))
            .await
            .map_err(|e| DoctextError::Other(format!("Image preprocessing task panicked: {}", e)))?
    }
}
