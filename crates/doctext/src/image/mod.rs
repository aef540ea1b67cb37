//! Image preprocessing for OCR.
//!
//! Requires the `ocr` feature.

pub mod preprocessing;

pub use preprocessing::{OcrImagePreprocessor, enhance_for_ocr, stretch_contrast};
