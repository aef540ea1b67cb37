//! File kind detection from MIME types and file extensions.
//!
//! Detection consults the MIME table first and only falls back to the file
//! extension when the declared MIME type is absent or unknown.

use crate::types::FileKind;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const LEGACY_WORD_MIME_TYPE: &str = "application/msword";

pub const PNG_MIME_TYPE: &str = "image/png";
pub const JPEG_MIME_TYPE: &str = "image/jpeg";
pub const GIF_MIME_TYPE: &str = "image/gif";
pub const BMP_MIME_TYPE: &str = "image/bmp";
pub const WEBP_MIME_TYPE: &str = "image/webp";
pub const TIFF_MIME_TYPE: &str = "image/tiff";

static MIME_TO_KIND: Lazy<HashMap<&'static str, FileKind>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert(PNG_MIME_TYPE, FileKind::Image);
    m.insert(JPEG_MIME_TYPE, FileKind::Image);
    m.insert("image/jpg", FileKind::Image);
    m.insert("image/pjpeg", FileKind::Image);
    m.insert(GIF_MIME_TYPE, FileKind::Image);
    m.insert(BMP_MIME_TYPE, FileKind::Image);
    m.insert("image/x-ms-bmp", FileKind::Image);
    m.insert(WEBP_MIME_TYPE, FileKind::Image);
    m.insert(TIFF_MIME_TYPE, FileKind::Image);

    m.insert(PDF_MIME_TYPE, FileKind::Pdf);
    m.insert(DOCX_MIME_TYPE, FileKind::Docx);
    m.insert(LEGACY_WORD_MIME_TYPE, FileKind::Doc);
    m.insert(PLAIN_TEXT_MIME_TYPE, FileKind::Text);

    m
});

static EXT_TO_KIND: Lazy<HashMap<&'static str, FileKind>> = Lazy::new(|| {
    let mut m = HashMap::new();

    for ext in ["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"] {
        m.insert(ext, FileKind::Image);
    }
    m.insert("pdf", FileKind::Pdf);
    m.insert("docx", FileKind::Docx);
    m.insert("doc", FileKind::Doc);
    m.insert("txt", FileKind::Text);

    m
});

/// Strip parameters and normalize case: `Text/Plain; charset=utf-8` -> `text/plain`.
fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Look up a MIME type in the fixed table.
pub fn kind_from_mime(mime_type: &str) -> Option<FileKind> {
    if mime_type.trim().is_empty() {
        return None;
    }
    MIME_TO_KIND.get(essence(mime_type).as_str()).copied()
}

/// Look up the extension after the last `.` of a file name.
///
/// A name without a `.` has no extension.
pub fn kind_from_file_name(file_name: &str) -> Option<FileKind> {
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    EXT_TO_KIND.get(ext.to_lowercase().as_str()).copied()
}

/// Detect the file kind of a payload.
///
/// The MIME type wins when both inputs resolve.
pub fn detect_file_kind(mime_type: Option<&str>, file_name: Option<&str>) -> Option<FileKind> {
    if let Some(kind) = mime_type.and_then(kind_from_mime) {
        return Some(kind);
    }

    file_name.filter(|name| !name.is_empty()).and_then(kind_from_file_name)
}
