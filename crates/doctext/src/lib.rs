//! doctext - file-type-aware text extraction.
//!
//! doctext takes uploaded documents (images, PDFs, Word files, plain text),
//! detects what each one is, routes it to the matching extraction strategy
//! and returns trimmed plain text with page count, OCR confidence and the
//! method that produced it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use doctext::{BatchDispatcher, BatchItem, BinaryData, ExtractionConfig};
//!
//! # async fn example() -> doctext::Result<()> {
//! let item = BatchItem::with_binary(
//!     "data",
//!     BinaryData::new(b"  hello world  ".to_vec())
//!         .with_file_name("hello.txt")
//!         .with_mime_type("text/plain"),
//! );
//!
//! let results = BatchDispatcher::new(ExtractionConfig::default()).run(&[item]).await?;
//! assert_eq!(results[0].text.as_deref(), Some("hello world"));
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core** (`core`): detection, routing, configuration and the batch dispatcher
//! - **Extractors** (`extractors`): one strategy per file kind
//! - **Plugins** (`plugins`): collaborator traits and the [`ExtractionBackends`] bundle
//! - **OCR** (`ocr`): per-batch engine lifecycle and the Tesseract backend
//!
//! # Features
//!
//! - `pdf` - pdfium text layer and page rendering
//! - `ocr` - Tesseract recognition and image preprocessing
//! - `office` - DOCX parsing and LibreOffice-backed DOC conversion
//! - `full` - all of the above

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extraction;
pub mod extractors;
pub mod ocr;
pub mod pdf;
pub mod plugins;
pub mod text;
pub mod types;

#[cfg(feature = "ocr")]
pub mod image;

pub use error::{DoctextError, Result};
pub use types::*;

pub use core::batch::BatchDispatcher;
pub use core::config::{ExtractionConfig, ItemOverrides, ItemParameters, OcrConfig, PdfConfig};
pub use core::mime::{
    DOCX_MIME_TYPE, LEGACY_WORD_MIME_TYPE, PDF_MIME_TYPE, PLAIN_TEXT_MIME_TYPE, detect_file_kind,
};
pub use core::routing::resolve_file_kind;

pub use ocr::{EngineStatus, OcrEngineLifecycle};
pub use plugins::{
    DocumentParser, ExtractionBackends, ImagePreprocessor, OcrEngine, OcrEngineFactory, OcrOutput, PdfRasterizer,
    PdfText, PdfTextLayer, Plugin,
};
