//! Word document strategies.

use crate::Result;
use crate::plugins::DocumentParser;
use crate::text::trim_text;

/// Extract the raw text of a `.docx` document.
pub async fn extract_docx(content: &[u8], parser: &dyn DocumentParser) -> Result<String> {
    let text = parser
        .parse(content)
        .await
        .map_err(|e| e.into_extraction("DOCX text extraction failed"))?;
    tracing::debug!(parser = parser.name(), chars = text.len(), "Extracted DOCX text");
    Ok(trim_text(&text).to_string())
}

/// Extract the raw text of a legacy `.doc` document.
pub async fn extract_doc(content: &[u8], parser: &dyn DocumentParser) -> Result<String> {
    let text = parser
        .parse(content)
        .await
        .map_err(|e| e.into_extraction("DOC text extraction failed"))?;
    tracing::debug!(parser = parser.name(), chars = text.len(), "Extracted DOC text");
    Ok(trim_text(&text).to_string())
}
