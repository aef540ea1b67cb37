//! Mock collaborators shared by the integration tests.
//!
//! Every mock counts its calls so tests can assert how often the dispatcher
//! reached each backend.

#![allow(dead_code)]

use async_trait::async_trait;
use doctext::{
    BatchItem, BinaryData, DoctextError, DocumentParser, ExtractionBackends, ImagePreprocessor, OcrEngine,
    OcrEngineFactory, OcrOutput, PdfRasterizer, PdfText, PdfTextLayer, Plugin, Result,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

macro_rules! mock_plugin {
    ($ty:ty, $name:expr) => {
        impl Plugin for $ty {
            fn name(&self) -> &str {
                $name
            }

            fn version(&self) -> String {
                "1.0.0".to_string()
            }
        }
    };
}

/// OCR engine that returns queued outputs in order, then a fixed fallback.
pub struct MockEngine {
    language: String,
    outputs: Mutex<VecDeque<OcrOutput>>,
    pub recognize_calls: AtomicUsize,
    pub terminate_calls: AtomicUsize,
    pub terminated: AtomicBool,
    pub fail_on_call: Option<usize>,
    pub seen_images: Mutex<Vec<Vec<u8>>>,
}

impl MockEngine {
    pub fn new(language: &str, outputs: Vec<(&str, f64)>) -> Self {
        Self {
            language: language.to_string(),
            outputs: Mutex::new(
                outputs
                    .into_iter()
                    .map(|(text, confidence)| OcrOutput {
                        text: text.to_string(),
                        confidence,
                    })
                    .collect(),
            ),
            recognize_calls: AtomicUsize::new(0),
            terminate_calls: AtomicUsize::new(0),
            terminated: AtomicBool::new(false),
            fail_on_call: None,
            seen_images: Mutex::new(Vec::new()),
        }
    }
}

mock_plugin!(MockEngine, "mock-ocr");

#[async_trait]
impl OcrEngine for MockEngine {
    async fn recognize(&self, image: &[u8]) -> Result<OcrOutput> {
        let call = self.recognize_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.seen_images.lock().unwrap().push(image.to_vec());

        if self.terminated.load(Ordering::SeqCst) {
            return Err(DoctextError::Other("engine used after terminate".to_string()));
        }
        if self.fail_on_call == Some(call) {
            return Err(DoctextError::Other("recognition crashed".to_string()));
        }

        Ok(self.outputs.lock().unwrap().pop_front().unwrap_or(OcrOutput {
            text: "recognized".to_string(),
            confidence: 75.0,
        }))
    }

    async fn terminate(&self) -> Result<()> {
        self.terminate_calls.fetch_add(1, Ordering::SeqCst);
        self.terminated.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn language(&self) -> &str {
        &self.language
    }
}

/// Factory handing out one shared [`MockEngine`].
pub struct MockFactory {
    pub engine: Arc<MockEngine>,
    pub create_calls: AtomicUsize,
    pub languages: Mutex<Vec<String>>,
    pub failure: Option<fn() -> DoctextError>,
}

impl MockFactory {
    pub fn new(engine: MockEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            create_calls: AtomicUsize::new(0),
            languages: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    pub fn failing(failure: fn() -> DoctextError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(MockEngine::new("eng", vec![]))
        }
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn terminates(&self) -> usize {
        self.engine.terminate_calls.load(Ordering::SeqCst)
    }

    pub fn recognitions(&self) -> usize {
        self.engine.recognize_calls.load(Ordering::SeqCst)
    }
}

mock_plugin!(MockFactory, "mock-ocr-factory");

#[async_trait]
impl OcrEngineFactory for MockFactory {
    async fn create(&self, language: &str) -> Result<Arc<dyn OcrEngine>> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.languages.lock().unwrap().push(language.to_string());

        if let Some(failure) = self.failure {
            return Err(failure());
        }

        let engine: Arc<dyn OcrEngine> = self.engine.clone();
        Ok(engine)
    }
}

/// PDF text layer with a fixed page count and text.
pub struct MockPdfText {
    pub page_count: usize,
    pub text: String,
    pub calls: AtomicUsize,
}

impl MockPdfText {
    pub fn new(page_count: usize, text: &str) -> Self {
        Self {
            page_count,
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

mock_plugin!(MockPdfText, "mock-pdf-text");

#[async_trait]
impl PdfTextLayer for MockPdfText {
    async fn extract_text(&self, _pdf: &[u8]) -> Result<PdfText> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PdfText {
            page_count: self.page_count,
            text: self.text.clone(),
        })
    }
}

/// Rasterizer producing `pages` fake page images.
pub struct MockRasterizer {
    pub pages: usize,
    pub calls: AtomicUsize,
    pub scales: Mutex<Vec<f32>>,
}

impl MockRasterizer {
    pub fn new(pages: usize) -> Self {
        Self {
            pages,
            calls: AtomicUsize::new(0),
            scales: Mutex::new(Vec::new()),
        }
    }

    pub fn renders(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

mock_plugin!(MockRasterizer, "mock-rasterizer");

#[async_trait]
impl PdfRasterizer for MockRasterizer {
    async fn render(&self, _pdf: &[u8], scale: f32) -> Result<Vec<Vec<u8>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.scales.lock().unwrap().push(scale);
        Ok((1..=self.pages).map(|page| format!("page-{}", page).into_bytes()).collect())
    }
}

/// Document parser returning fixed text, or failing.
pub struct MockParser {
    pub text: Option<String>,
    pub calls: AtomicUsize,
}

impl MockParser {
    pub fn new(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn parses(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

mock_plugin!(MockParser, "mock-parser");

#[async_trait]
impl DocumentParser for MockParser {
    async fn parse(&self, _document: &[u8]) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.text
            .clone()
            .ok_or_else(|| DoctextError::Other("corrupt document".to_string()))
    }
}

/// Preprocessor that tags the image so tests can see it ran.
pub struct MockPreprocessor {
    pub calls: AtomicUsize,
}

impl MockPreprocessor {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

mock_plugin!(MockPreprocessor, "mock-preprocessor");

#[async_trait]
impl ImagePreprocessor for MockPreprocessor {
    async fn preprocess(&self, image: &[u8]) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut out = b"enhanced:".to_vec();
        out.extend_from_slice(image);
        Ok(out)
    }
}

/// All mocks wired into an [`ExtractionBackends`], with handles kept for assertions.
pub struct MockBackends {
    pub factory: Arc<MockFactory>,
    pub preprocessor: Arc<MockPreprocessor>,
    pub pdf_text: Arc<MockPdfText>,
    pub rasterizer: Arc<MockRasterizer>,
    pub docx: Arc<MockParser>,
    pub doc: Arc<MockParser>,
}

impl MockBackends {
    pub fn new(factory: MockFactory, pdf_text: MockPdfText, rasterizer: MockRasterizer) -> Self {
        Self {
            factory: Arc::new(factory),
            preprocessor: Arc::new(MockPreprocessor::new()),
            pdf_text: Arc::new(pdf_text),
            rasterizer: Arc::new(rasterizer),
            docx: Arc::new(MockParser::new("  docx body  ")),
            doc: Arc::new(MockParser::new("\ndoc body\n")),
        }
    }

    pub fn with_docx(mut self, parser: MockParser) -> Self {
        self.docx = Arc::new(parser);
        self
    }

    pub fn backends(&self) -> ExtractionBackends {
        ExtractionBackends::default()
            .with_ocr_factory(self.factory.clone())
            .with_preprocessor(self.preprocessor.clone())
            .with_pdf_text(self.pdf_text.clone())
            .with_pdf_rasterizer(self.rasterizer.clone())
            .with_docx(self.docx.clone())
            .with_doc(self.doc.clone())
    }
}

impl Default for MockBackends {
    fn default() -> Self {
        Self::new(
            MockFactory::new(MockEngine::new("eng", vec![])),
            MockPdfText::new(1, "A text layer comfortably longer than the fifty character threshold."),
            MockRasterizer::new(1),
        )
    }
}

/// Item with a single `data` field.
pub fn item(bytes: &[u8], file_name: &str, mime_type: &str) -> BatchItem {
    let mut binary = BinaryData::new(bytes.to_vec()).with_file_name(file_name);
    if !mime_type.is_empty() {
        binary = binary.with_mime_type(mime_type);
    }
    BatchItem::with_binary("data", binary)
}
