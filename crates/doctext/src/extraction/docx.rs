//! DOCX text extraction using docx-lite.

use crate::plugins::{DocumentParser, Plugin};
use crate::{DoctextError, Result};
use async_trait::async_trait;

/// Extract text from DOCX bytes.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    docx_lite::extract_text_from_bytes(bytes)
        .map_err(|e| DoctextError::extraction(format!("DOCX text extraction failed: {}", e)))
}

/// [`DocumentParser`] for `.docx` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxParser;

impl Plugin for DocxParser {
    fn name(&self) -> &str {
        "docx-lite"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[async_trait]
impl DocumentParser for DocxParser {
    async fn parse(&self, document: &[u8]) -> Result<String> {
        extract_text(document)
    }
}
