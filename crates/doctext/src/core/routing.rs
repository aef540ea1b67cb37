//! Operation to file kind resolution.

use crate::core::mime::detect_file_kind;
use crate::types::{FileKind, Operation, PdfStrategy};

/// Resolve the file kind an item should be extracted as.
///
/// `Ocr` and `Pdf` force their kind regardless of the declared type.
/// `Document` keeps a detected `Doc` or `Docx` and otherwise assumes `Docx`.
/// `Auto` returns whatever detection finds, `None` meaning unsupported.
pub fn resolve_file_kind(operation: Operation, mime_type: &str, file_name: &str) -> Option<FileKind> {
    match operation {
        Operation::Ocr => Some(FileKind::Image),
        Operation::Pdf => Some(FileKind::Pdf),
        Operation::Document => match detect_file_kind(Some(mime_type), Some(file_name)) {
            Some(FileKind::Doc) => Some(FileKind::Doc),
            _ => Some(FileKind::Docx),
        },
        Operation::Auto => detect_file_kind(Some(mime_type), Some(file_name)),
    }
}

/// Whether extracting `kind` with `strategy` may need an OCR engine.
pub fn requires_ocr(kind: FileKind, strategy: PdfStrategy) -> bool {
    match kind {
        FileKind::Image => true,
        FileKind::Pdf => strategy.may_use_ocr(),
        FileKind::Docx | FileKind::Doc | FileKind::Text => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mime::{DOCX_MIME_TYPE, LEGACY_WORD_MIME_TYPE};

    #[test]
    fn test_forced_operations_ignore_detection() {
        assert_eq!(
            resolve_file_kind(Operation::Ocr, "application/pdf", "scan.pdf"),
            Some(FileKind::Image)
        );
        assert_eq!(
            resolve_file_kind(Operation::Pdf, "text/plain", "notes.txt"),
            Some(FileKind::Pdf)
        );
        assert_eq!(
            resolve_file_kind(Operation::Ocr, "application/x-unknown", "unknown"),
            Some(FileKind::Image)
        );
    }

    #[test]
    fn test_document_reaches_doc_path() {
        assert_eq!(
            resolve_file_kind(Operation::Document, LEGACY_WORD_MIME_TYPE, "letter.doc"),
            Some(FileKind::Doc)
        );
        assert_eq!(
            resolve_file_kind(Operation::Document, "", "letter.DOC"),
            Some(FileKind::Doc)
        );
    }

    #[test]
    fn test_document_defaults_to_docx() {
        assert_eq!(
            resolve_file_kind(Operation::Document, DOCX_MIME_TYPE, "report.docx"),
            Some(FileKind::Docx)
        );
        assert_eq!(
            resolve_file_kind(Operation::Document, "application/pdf", "report.pdf"),
            Some(FileKind::Docx)
        );
        assert_eq!(
            resolve_file_kind(Operation::Document, "", "unknown"),
            Some(FileKind::Docx)
        );
    }

    #[test]
    fn test_auto_uses_detection() {
        assert_eq!(
            resolve_file_kind(Operation::Auto, "image/png", "x.png"),
            Some(FileKind::Image)
        );
        assert_eq!(resolve_file_kind(Operation::Auto, "", "notes.txt"), Some(FileKind::Text));
        assert_eq!(resolve_file_kind(Operation::Auto, "application/x-unknown", "unknown"), None);
    }

    #[test]
    fn test_requires_ocr() {
        assert!(requires_ocr(FileKind::Image, PdfStrategy::Text));
        assert!(requires_ocr(FileKind::Pdf, PdfStrategy::Auto));
        assert!(requires_ocr(FileKind::Pdf, PdfStrategy::Ocr));
        assert!(!requires_ocr(FileKind::Pdf, PdfStrategy::Text));
        assert!(!requires_ocr(FileKind::Docx, PdfStrategy::Auto));
        assert!(!requires_ocr(FileKind::Text, PdfStrategy::Ocr));
    }
}
