//! OCR engine management and the Tesseract backend.
//!
//! [`lifecycle`] is backend-agnostic and always compiled. The Tesseract
//! engine requires the `ocr` feature.

pub mod lifecycle;

#[cfg(feature = "ocr")]
pub mod error;
#[cfg(feature = "ocr")]
pub mod tesseract;

pub use lifecycle::{EngineStatus, OcrEngineLifecycle};

#[cfg(feature = "ocr")]
pub use error::OcrError;
#[cfg(feature = "ocr")]
pub use tesseract::{TesseractEngine, TesseractEngineFactory};
