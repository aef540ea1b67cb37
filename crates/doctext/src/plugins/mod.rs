//! Backend traits for the collaborators the dispatcher delegates to.
//!
//! # Plugin Types
//!
//! - [`Plugin`] - Base trait that all backends implement
//! - [`OcrEngineFactory`] / [`OcrEngine`] - text recognition
//! - [`PdfTextLayer`] - embedded PDF text
//! - [`PdfRasterizer`] - PDF page rendering
//! - [`DocumentParser`] - DOCX and DOC parsing
//! - [`ImagePreprocessor`] - image enhancement before OCR
//!
//! [`ExtractionBackends`] bundles one implementation of each. Its `Default`
//! picks the concrete backends compiled in through cargo features and falls
//! back to [`MissingBackend`] for concerns whose feature is disabled.

pub mod document;
pub mod image;
pub mod ocr;
pub mod pdf;
pub mod traits;

pub use document::DocumentParser;
pub use self::image::ImagePreprocessor;
pub use ocr::{OcrEngine, OcrEngineFactory, OcrOutput};
pub use pdf::{PdfRasterizer, PdfText, PdfTextLayer};
pub use traits::Plugin;

use crate::{DoctextError, Result};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// The full set of collaborators used by the extraction strategies.
#[derive(Clone)]
pub struct ExtractionBackends {
    pub ocr_factory: Arc<dyn OcrEngineFactory>,
    pub preprocessor: Arc<dyn ImagePreprocessor>,
    pub pdf_text: Arc<dyn PdfTextLayer>,
    pub pdf_rasterizer: Arc<dyn PdfRasterizer>,
    pub docx: Arc<dyn DocumentParser>,
    pub doc: Arc<dyn DocumentParser>,
}

impl fmt::Debug for ExtractionBackends {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionBackends")
            .field("ocr_factory", &self.ocr_factory.name())
            .field("preprocessor", &self.preprocessor.name())
            .field("pdf_text", &self.pdf_text.name())
            .field("pdf_rasterizer", &self.pdf_rasterizer.name())
            .field("docx", &self.docx.name())
            .field("doc", &self.doc.name())
            .finish()
    }
}

impl Default for ExtractionBackends {
    fn default() -> Self {
        Self {
            ocr_factory: default_ocr_factory(),
            preprocessor: default_preprocessor(),
            pdf_text: default_pdf_text(),
            pdf_rasterizer: default_pdf_rasterizer(),
            docx: default_docx(),
            doc: default_doc(),
        }
    }
}

impl ExtractionBackends {
    pub fn with_ocr_factory(mut self, factory: Arc<dyn OcrEngineFactory>) -> Self {
        self.ocr_factory = factory;
        self
    }

    pub fn with_preprocessor(mut self, preprocessor: Arc<dyn ImagePreprocessor>) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn with_pdf_text(mut self, pdf_text: Arc<dyn PdfTextLayer>) -> Self {
        self.pdf_text = pdf_text;
        self
    }

    pub fn with_pdf_rasterizer(mut self, rasterizer: Arc<dyn PdfRasterizer>) -> Self {
        self.pdf_rasterizer = rasterizer;
        self
    }

    pub fn with_docx(mut self, parser: Arc<dyn DocumentParser>) -> Self {
        self.docx = parser;
        self
    }

    pub fn with_doc(mut self, parser: Arc<dyn DocumentParser>) -> Self {
        self.doc = parser;
        self
    }
}

#[cfg(feature = "ocr")]
fn default_ocr_factory() -> Arc<dyn OcrEngineFactory> {
    Arc::new(crate::ocr::TesseractEngineFactory::new())
}

#[cfg(not(feature = "ocr"))]
fn default_ocr_factory() -> Arc<dyn OcrEngineFactory> {
    Arc::new(MissingBackend::new("OCR", "ocr"))
}

#[cfg(feature = "ocr")]
fn default_preprocessor() -> Arc<dyn ImagePreprocessor> {
    Arc::new(crate::image::OcrImagePreprocessor::default())
}

#[cfg(not(feature = "ocr"))]
fn default_preprocessor() -> Arc<dyn ImagePreprocessor> {
    Arc::new(MissingBackend::new("Image preprocessing", "ocr"))
}

#[cfg(feature = "pdf")]
fn default_pdf_text() -> Arc<dyn PdfTextLayer> {
    Arc::new(crate::pdf::PdfiumTextLayer)
}

#[cfg(not(feature = "pdf"))]
fn default_pdf_text() -> Arc<dyn PdfTextLayer> {
    Arc::new(MissingBackend::new("PDF text extraction", "pdf"))
}

#[cfg(feature = "pdf")]
fn default_pdf_rasterizer() -> Arc<dyn PdfRasterizer> {
    Arc::new(crate::pdf::PdfiumRasterizer)
}

#[cfg(not(feature = "pdf"))]
fn default_pdf_rasterizer() -> Arc<dyn PdfRasterizer> {
    Arc::new(MissingBackend::new("PDF rendering", "pdf"))
}

#[cfg(feature = "office")]
fn default_docx() -> Arc<dyn DocumentParser> {
    Arc::new(crate::extraction::docx::DocxParser)
}

#[cfg(not(feature = "office"))]
fn default_docx() -> Arc<dyn DocumentParser> {
    Arc::new(MissingBackend::new("DOCX extraction", "office"))
}

#[cfg(feature = "office")]
fn default_doc() -> Arc<dyn DocumentParser> {
    Arc::new(crate::extraction::libreoffice::LegacyDocParser::default())
}

#[cfg(not(feature = "office"))]
fn default_doc() -> Arc<dyn DocumentParser> {
    Arc::new(MissingBackend::new("DOC extraction", "office"))
}

/// Stand-in for a backend whose cargo feature is disabled.
///
/// Every operation fails with `MissingDependency`. As an OCR factory it also
/// reports itself unavailable, so batches proceed without an engine.
#[derive(Debug, Clone)]
pub struct MissingBackend {
    concern: &'static str,
    feature: &'static str,
}

impl MissingBackend {
    pub fn new(concern: &'static str, feature: &'static str) -> Self {
        Self { concern, feature }
    }

    fn message(&self) -> String {
        format!(
            "{} support is not available. Rebuild doctext with the `{}` feature enabled.",
            self.concern, self.feature
        )
    }

    fn error(&self) -> DoctextError {
        DoctextError::MissingDependency(self.message())
    }
}

impl Plugin for MissingBackend {
    fn name(&self) -> &str {
        "missing"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[async_trait]
impl OcrEngineFactory for MissingBackend {
    async fn create(&self, _language: &str) -> Result<Arc<dyn OcrEngine>> {
        Err(self.error())
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[async_trait]
impl ImagePreprocessor for MissingBackend {
    async fn preprocess(&self, _image: &[u8]) -> Result<Vec<u8>> {
        Err(self.error())
    }
}

#[async_trait]
impl PdfTextLayer for MissingBackend {
    async fn extract_text(&self, _pdf: &[u8]) -> Result<PdfText> {
        Err(self.error())
    }
}

#[async_trait]
impl PdfRasterizer for MissingBackend {
    async fn render(&self, _pdf: &[u8], _scale: f32) -> Result<Vec<Vec<u8>>> {
        Err(self.error())
    }
}

#[async_trait]
impl DocumentParser for MissingBackend {
    async fn parse(&self, _document: &[u8]) -> Result<String> {
        Err(self.error())
    }
}
