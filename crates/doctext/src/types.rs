//! Core data types shared across the extraction pipeline.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DoctextError;

/// Closed set of document categories the dispatcher can route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Pdf,
    Docx,
    Doc,
    Text,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
            FileKind::Doc => "doc",
            FileKind::Text => "text",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the caller asked the dispatcher to do with an item.
///
/// `Ocr` and `Pdf` force a file kind regardless of the declared type,
/// `Document` narrows detection to the Word formats and `Auto` trusts
/// detection entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Auto,
    Ocr,
    Pdf,
    Document,
}

impl FromStr for Operation {
    type Err = DoctextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Operation::Auto),
            "ocr" => Ok(Operation::Ocr),
            "pdf" => Ok(Operation::Pdf),
            "document" => Ok(Operation::Document),
            other => Err(DoctextError::validation(format!(
                "Invalid operation '{}'. Valid values: auto, ocr, pdf, document",
                other
            ))),
        }
    }
}

/// How a PDF should be turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfStrategy {
    /// Text layer first, OCR when it yields too little text.
    #[default]
    Auto,
    /// Embedded text layer only.
    Text,
    /// Rasterize and OCR every page.
    Ocr,
}

impl PdfStrategy {
    pub fn reads_text_layer(&self) -> bool {
        matches!(self, PdfStrategy::Auto | PdfStrategy::Text)
    }

    pub fn may_use_ocr(&self) -> bool {
        matches!(self, PdfStrategy::Auto | PdfStrategy::Ocr)
    }
}

impl FromStr for PdfStrategy {
    type Err = DoctextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(PdfStrategy::Auto),
            "text" => Ok(PdfStrategy::Text),
            "ocr" => Ok(PdfStrategy::Ocr),
            other => Err(DoctextError::validation(format!(
                "Invalid PDF strategy '{}'. Valid values: auto, text, ocr",
                other
            ))),
        }
    }
}

/// The path that actually produced a result's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMethod {
    Ocr,
    PdfText,
    PdfOcr,
    Docx,
    Doc,
    Txt,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Ocr => "ocr",
            ExtractionMethod::PdfText => "pdf-text",
            ExtractionMethod::PdfOcr => "pdf-ocr",
            ExtractionMethod::Docx => "docx",
            ExtractionMethod::Doc => "doc",
            ExtractionMethod::Txt => "txt",
        }
    }

    /// OCR produced the text, so a confidence and language are reported.
    pub fn is_ocr(&self) -> bool {
        matches!(self, ExtractionMethod::Ocr | ExtractionMethod::PdfOcr)
    }

    /// The source was a PDF, so a page count is reported.
    pub fn is_pdf(&self) -> bool {
        matches!(self, ExtractionMethod::PdfText | ExtractionMethod::PdfOcr)
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output record per batch item.
///
/// Successful records fill `text`, `file_type` and `method`; the remaining
/// fields follow the method (see [`ExtractionMethod::is_ocr`] and
/// [`ExtractionMethod::is_pdf`]). Degraded records carry only `error`
/// alongside the recovered file name and MIME type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub file_name: String,
    pub mime_type: String,
    pub text: Option<String>,
    pub file_type: Option<FileKind>,
    pub page_count: Option<usize>,
    pub confidence: Option<u8>,
    pub language: Option<String>,
    pub method: Option<ExtractionMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// Build a degraded record for an item whose extraction failed.
    pub fn failed(file_name: impl Into<String>, mime_type: impl Into<String>, error: &DoctextError) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            text: None,
            file_type: None,
            page_count: None,
            confidence: None,
            language: None,
            method: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A binary payload attached to a batch item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryData {
    pub data: Vec<u8>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl BinaryData {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            file_name: None,
            mime_type: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// File name, or `"unknown"` when none was declared.
    pub fn file_name_or_default(&self) -> &str {
        self.file_name.as_deref().filter(|name| !name.is_empty()).unwrap_or("unknown")
    }

    /// Declared MIME type, or the empty string.
    pub fn mime_type_or_default(&self) -> &str {
        self.mime_type.as_deref().unwrap_or("")
    }
}

/// A single unit of work: named binary fields in attachment order plus
/// optional per-item parameter overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    #[serde(default)]
    pub binary: IndexMap<String, BinaryData>,
    #[serde(default)]
    pub overrides: crate::core::config::ItemOverrides,
}

impl BatchItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Item with a single binary field.
    pub fn with_binary(name: impl Into<String>, binary: BinaryData) -> Self {
        let mut item = Self::default();
        item.binary.insert(name.into(), binary);
        item
    }

    pub fn attach(mut self, name: impl Into<String>, binary: BinaryData) -> Self {
        self.binary.insert(name.into(), binary);
        self
    }

    pub fn with_overrides(mut self, overrides: crate::core::config::ItemOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Resolve the payload to extract: the named field when present,
    /// otherwise the first attached field.
    pub fn resolve_binary(&self, property: &str) -> Option<(&str, &BinaryData)> {
        self.binary
            .get_key_value(property)
            .or_else(|| self.binary.first())
            .map(|(name, data)| (name.as_str(), data))
    }
}
