//! Word document parser plugin trait.

use crate::Result;
use crate::plugins::Plugin;
use async_trait::async_trait;

/// Extracts raw text from a Word document (`.docx` or legacy `.doc`).
#[async_trait]
pub trait DocumentParser: Plugin {
    /// # Errors
    ///
    /// - `DoctextError::Extraction` - the document is malformed
    /// - `DoctextError::MissingDependency` - a required system tool is missing
    async fn parse(&self, document: &[u8]) -> Result<String>;
}
