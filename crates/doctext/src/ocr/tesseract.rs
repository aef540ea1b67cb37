//! Native Tesseract OCR engine.
//!
//! [`TesseractEngineFactory::create`] resolves the tessdata directory, checks
//! that every requested language has its traineddata file and initializes a
//! single Tesseract API. The engine keeps that handle for its whole life:
//! recognition runs on tokio's blocking pool against the shared handle and
//! `terminate` drops it.

use super::error::OcrError;
use crate::Result;
use crate::plugins::{OcrEngine, OcrEngineFactory, OcrOutput, Plugin};
use async_trait::async_trait;
use kreuzberg_tesseract::{TessPageSegMode, TesseractAPI};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Fully automatic page segmentation without OSD.
const DEFAULT_PAGE_SEG_MODE: u8 = 3;

const FALLBACK_TESSDATA_PATHS: &[&str] = &[
    "/opt/homebrew/share/tessdata",
    "/opt/homebrew/opt/tesseract/share/tessdata",
    "/usr/local/opt/tesseract/share/tessdata",
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    r#"C:\Program Files\Tesseract-OCR\tessdata"#,
    r#"C:\ProgramData\Tesseract-OCR\tessdata"#,
];

/// `TESSDATA_PREFIX` if set, otherwise the first well-known directory that exists.
pub fn resolve_tessdata_path() -> Option<PathBuf> {
    env::var_os("TESSDATA_PREFIX")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            FALLBACK_TESSDATA_PATHS
                .iter()
                .map(Path::new)
                .find(|p| p.exists())
                .map(Path::to_path_buf)
        })
}

/// Reject empty codes and languages without traineddata.
///
/// Tesseract can crash on a missing language file instead of reporting an error.
fn validate_language(tessdata_path: &Path, language: &str) -> std::result::Result<(), OcrError> {
    if language.trim().is_empty() {
        return Err(OcrError::InvalidLanguageCode(
            "Language cannot be empty. Please specify a valid language code (e.g., 'eng')".to_string(),
        ));
    }

    if tessdata_path.as_os_str().is_empty() {
        return Ok(());
    }

    for lang in language.split('+').map(str::trim).filter(|l| !l.is_empty()) {
        let traineddata = tessdata_path.join(format!("{}.traineddata", lang));
        if !traineddata.exists() {
            return Err(OcrError::InvalidLanguageCode(format!(
                "Language '{}' not found. Traineddata file does not exist: {}",
                lang,
                traineddata.display()
            )));
        }
    }

    Ok(())
}

fn init_api(tessdata_path: &Path, language: &str, page_seg_mode: u8) -> std::result::Result<TesseractAPI, OcrError> {
    let api = TesseractAPI::new();
    let datapath = tessdata_path.to_string_lossy().into_owned();

    api.init(&datapath, language).map_err(|e| {
        OcrError::TesseractInitializationFailed(format!("Failed to initialize language '{}': {}", language, e))
    })?;

    api.set_page_seg_mode(TessPageSegMode::from_int(page_seg_mode as i32))
        .map_err(|e| OcrError::TesseractInitializationFailed(format!("Failed to set PSM mode: {}", e)))?;

    Ok(api)
}

fn recognize_with(api: &TesseractAPI, image_bytes: &[u8]) -> std::result::Result<OcrOutput, OcrError> {
    let img = image::load_from_memory(image_bytes)
        .map_err(|e| OcrError::ImageProcessingFailed(format!("Failed to decode image: {}", e)))?;

    let rgb_image = img.to_rgb8();
    let (width, height) = rgb_image.dimensions();
    let bytes_per_pixel = 3;
    let bytes_per_line = width * bytes_per_pixel;

    api.set_image(
        rgb_image.as_raw(),
        width as i32,
        height as i32,
        bytes_per_pixel as i32,
        bytes_per_line as i32,
    )
    .map_err(|e| OcrError::ProcessingFailed(format!("Failed to set image: {}", e)))?;

    api.recognize()
        .map_err(|e| OcrError::ProcessingFailed(format!("Failed to recognize text: {}", e)))?;

    let text = api
        .get_utf8_text()
        .map_err(|e| OcrError::ProcessingFailed(format!("Failed to extract text: {}", e)))?;

    let confidence = api
        .mean_text_conf()
        .map_err(|e| OcrError::ProcessingFailed(format!("Failed to read confidence: {}", e)))?;

    // Drop page results but keep the loaded language data for the next image.
    api.clear()
        .map_err(|e| OcrError::ProcessingFailed(format!("Failed to clear recognition results: {}", e)))?;

    Ok(OcrOutput {
        text,
        confidence: confidence as f64,
    })
}

/// Creates [`TesseractEngine`]s.
#[derive(Debug, Clone)]
pub struct TesseractEngineFactory {
    tessdata_path: Option<PathBuf>,
    page_seg_mode: u8,
}

impl TesseractEngineFactory {
    pub fn new() -> Self {
        Self {
            tessdata_path: None,
            page_seg_mode: DEFAULT_PAGE_SEG_MODE,
        }
    }

    /// Use an explicit tessdata directory instead of discovering one.
    pub fn with_tessdata_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tessdata_path = Some(path.into());
        self
    }

    pub fn with_page_seg_mode(mut self, page_seg_mode: u8) -> Self {
        self.page_seg_mode = page_seg_mode;
        self
    }
}

impl Default for TesseractEngineFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for TesseractEngineFactory {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn version(&self) -> String {
        TesseractAPI::version().to_string()
    }
}

#[async_trait]
impl OcrEngineFactory for TesseractEngineFactory {
    async fn create(&self, language: &str) -> Result<Arc<dyn OcrEngine>> {
        let tessdata_path = self
            .tessdata_path
            .clone()
            .or_else(resolve_tessdata_path)
            .unwrap_or_default();

        validate_language(&tessdata_path, language)?;

        let page_seg_mode = self.page_seg_mode;
        let init_path = tessdata_path.clone();
        let init_language = language.to_string();

        let api = tokio::task::spawn_blocking(move || init_api(&init_path, &init_language, page_seg_mode))
            .await
            .map_err(|e| OcrError::TesseractInitializationFailed(format!("Tesseract task panicked: {}", e)))??;

        tracing::debug!(
            language,
            tessdata = %tessdata_path.display(),
            version = %TesseractAPI::version(),
            "Tesseract engine ready"
        );

        Ok(Arc::new(TesseractEngine::new(api, language)))
    }
}

/// A Tesseract engine holding one initialized API handle.
///
/// The handle is created by the factory, shared by every `recognize` call
/// and released by `terminate`.
pub struct TesseractEngine {
    api: Arc<Mutex<Option<TesseractAPI>>>,
    language: String,
}

impl TesseractEngine {
    fn new(api: TesseractAPI, language: &str) -> Self {
        Self {
            api: Arc::new(Mutex::new(Some(api))),
            language: language.to_string(),
        }
    }

    /// Whether the API handle is still held.
    pub fn is_running(&self) -> bool {
        self.api.lock().map(|api| api.is_some()).unwrap_or(false)
    }
}

impl fmt::Debug for TesseractEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TesseractEngine")
            .field("language", &self.language)
            .field("running", &self.is_running())
            .finish()
    }
}

impl Plugin for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn version(&self) -> String {
        TesseractAPI::version().to_string()
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn recognize(&self, image: &[u8]) -> Result<OcrOutput> {
        let image_bytes = image.to_vec();
        let api = Arc::clone(&self.api);

        let output = tokio::task::spawn_blocking(move || {
            let guard = api
                .lock()
                .map_err(|e| OcrError::ProcessingFailed(format!("Failed to acquire Tesseract lock: {}", e)))?;
            let api = guard.as_ref().ok_or(OcrError::EngineTerminated)?;
            recognize_with(api, &image_bytes)
        })
        .await
        .map_err(|e| OcrError::ProcessingFailed(format!("Tesseract task panicked: {}", e)))??;

        Ok(output)
    }

    async fn terminate(&self) -> Result<()> {
        let released = self
            .api
            .lock()
            .map_err(|e| OcrError::ProcessingFailed(format!("Failed to acquire Tesseract lock: {}", e)))?
            .take();

        if released.is_some() {
            tracing::debug!(language = %self.language, "Released Tesseract API");
        }
        Ok(())
    }

    fn language(&self) -> &str {
        &self.language
    }
}
