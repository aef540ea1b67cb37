//! File I/O utilities.
//!
//! Builds [`BinaryData`] payloads from files on disk, guessing the MIME type
//! from the extension and falling back to magic-byte sniffing.

use crate::types::BinaryData;
use crate::{DoctextError, Result};
use std::path::Path;
use tokio::fs;

const OCTET_STREAM: &str = "application/octet-stream";

/// Guess a MIME type from the path, then from the content.
///
/// Extensions that only map to `application/octet-stream` (`.bin`, `.dat`)
/// are sniffed as well; the generic type is kept when sniffing finds nothing.
pub fn guess_mime_type(path: &Path, content: &[u8]) -> Option<String> {
    let guessed = mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string());

    match guessed {
        Some(mime) if mime != OCTET_STREAM => Some(mime),
        guessed => infer::get(content)
            .map(|kind| kind.mime_type().to_string())
            .or(guessed),
    }
}

/// Read a file into a binary payload with its name and guessed MIME type.
///
/// # Errors
///
/// Returns `DoctextError::Io` for I/O errors (these always bubble up).
pub async fn read_binary(path: impl AsRef<Path>) -> Result<BinaryData> {
    let path = path.as_ref();
    let data = fs::read(path).await.map_err(DoctextError::Io)?;

    let mut binary = BinaryData::new(Vec::new());
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        binary = binary.with_file_name(name);
    }
    if let Some(mime) = guess_mime_type(path, &data) {
        binary = binary.with_mime_type(mime);
    }
    binary.data = data;

    Ok(binary)
}
