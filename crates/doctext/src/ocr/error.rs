use std::fmt;

/// Tesseract backend errors.
#[derive(Debug, Clone)]
pub enum OcrError {
    TesseractInitializationFailed(String),
    InvalidLanguageCode(String),
    ImageProcessingFailed(String),
    ProcessingFailed(String),
    EngineTerminated,
}

impl fmt::Display for OcrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TesseractInitializationFailed(msg) => {
                write!(f, "Tesseract initialization failed: {}", msg)
            }
            Self::InvalidLanguageCode(msg) => write!(f, "Invalid language code: {}", msg),
            Self::ImageProcessingFailed(msg) => write!(f, "Image processing failed: {}", msg),
            Self::ProcessingFailed(msg) => write!(f, "OCR processing failed: {}", msg),
            Self::EngineTerminated => write!(f, "OCR engine has been terminated"),
        }
    }
}

impl std::error::Error for OcrError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DoctextError;

    #[test]
    fn test_display() {
        assert_eq!(
            OcrError::InvalidLanguageCode("xx".to_string()).to_string(),
            "Invalid language code: xx"
        );
        assert_eq!(OcrError::EngineTerminated.to_string(), "OCR engine has been terminated");
    }

    #[test]
    fn test_init_failures_convert_to_engine_init() {
        let err: DoctextError = OcrError::TesseractInitializationFailed("no tessdata".to_string()).into();
        assert!(err.aborts_batch());

        let err: DoctextError = OcrError::ProcessingFailed("blank page".to_string()).into();
        assert!(matches!(err, DoctextError::Extraction { .. }));
    }
}
