//! Error types for doctext.
//!
//! Every fallible operation returns [`DoctextError`]. The variants mirror the
//! failure kinds a batch can observe:
//!
//! - `UnsupportedType` - the file kind could not be resolved
//! - `MissingBinary` - an item carried no binary payload
//! - `Extraction` - a backend rejected or failed to process the buffer
//! - `EngineInit` - the OCR engine could not be started (aborts the batch)
//! - `Validation` - invalid configuration or per-item overrides
//! - `MissingDependency` - a backend feature is disabled or a system binary is absent
//!
//! `Io` errors always bubble up unchanged.
use thiserror::Error;

/// Result type alias using `DoctextError`.
pub type Result<T> = std::result::Result<T, DoctextError>;

/// Main error type for all doctext operations.
#[derive(Debug, Error)]
pub enum DoctextError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("No binary data found on item {item_index}")]
    MissingBinary { item_index: usize },

    #[error("Extraction error: {message}")]
    Extraction {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR engine initialization failed: {message}")]
    EngineInit {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for DoctextError {
    fn from(err: serde_json::Error) -> Self {
        DoctextError::Validation {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(feature = "pdf")]
impl From<crate::pdf::error::PdfError> for DoctextError {
    fn from(err: crate::pdf::error::PdfError) -> Self {
        DoctextError::Extraction {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(feature = "ocr")]
impl From<crate::ocr::error::OcrError> for DoctextError {
    fn from(err: crate::ocr::error::OcrError) -> Self {
        use crate::ocr::error::OcrError;

        match err {
            OcrError::TesseractInitializationFailed(_) | OcrError::InvalidLanguageCode(_) => DoctextError::EngineInit {
                message: err.to_string(),
                source: Some(Box::new(err)),
            },
            _ => DoctextError::Extraction {
                message: err.to_string(),
                source: Some(Box::new(err)),
            },
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl DoctextError {
    error_constructor!(extraction, Extraction);
    error_constructor!(engine_init, EngineInit);
    error_constructor!(validation, Validation);

    /// Whether this error must abort the whole batch regardless of the
    /// continuation policy.
    pub fn aborts_batch(&self) -> bool {
        matches!(self, DoctextError::EngineInit { .. })
    }

    /// Wrap a backend failure as an `Extraction` error.
    ///
    /// Errors that already carry a batch-level meaning (`Extraction`,
    /// `EngineInit`, `MissingDependency`, `Io`) pass through unchanged.
    pub fn into_extraction(self, context: &str) -> Self {
        match self {
            err @ (DoctextError::Extraction { .. }
            | DoctextError::EngineInit { .. }
            | DoctextError::MissingDependency(_)
            | DoctextError::Io(_)) => err,
            other => DoctextError::Extraction {
                message: format!("{}: {}", context, other),
                source: Some(Box::new(other)),
            },
        }
    }
}
