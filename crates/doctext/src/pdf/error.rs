use std::fmt;

#[derive(Debug, Clone)]
pub enum PdfError {
    InvalidPdf(String),
    PasswordRequired,
    TextExtractionFailed(String),
    RenderingFailed(String),
    ImageEncodingFailed(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::InvalidPdf(msg) => write!(f, "Invalid PDF: {}", msg),
            PdfError::PasswordRequired => write!(f, "PDF is password-protected"),
            PdfError::TextExtractionFailed(msg) => write!(f, "Text extraction failed: {}", msg),
            PdfError::RenderingFailed(msg) => write!(f, "Page rendering failed: {}", msg),
            PdfError::ImageEncodingFailed(msg) => write!(f, "Page image encoding failed: {}", msg),
        }
    }
}

impl std::error::Error for PdfError {}

impl PdfError {
    /// Classify a pdfium load failure.
    pub(crate) fn from_load_error(message: String) -> Self {
        if message.contains("password") || message.contains("Password") {
            PdfError::PasswordRequired
        } else {
            PdfError::InvalidPdf(message)
        }
    }
}

pub type Result<T> = std::result::Result<T, PdfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pdf_error() {
        let err = PdfError::InvalidPdf("corrupted header".to_string());
        assert_eq!(err.to_string(), "Invalid PDF: corrupted header");
    }

    #[test]
    fn test_rendering_failed_error() {
        let err = PdfError::RenderingFailed("out of memory".to_string());
        assert_eq!(err.to_string(), "Page rendering failed: out of memory");
    }

    #[test]
    fn test_from_load_error() {
        assert!(matches!(
            PdfError::from_load_error("Password required".to_string()),
            PdfError::PasswordRequired
        ));
        assert!(matches!(
            PdfError::from_load_error("FormatError".to_string()),
            PdfError::InvalidPdf(_)
        ));
    }

    #[test]
    fn test_converts_to_extraction_error() {
        let err: crate::DoctextError = PdfError::PasswordRequired.into();
        assert_eq!(err.to_string(), "Extraction error: PDF is password-protected");
    }
}
