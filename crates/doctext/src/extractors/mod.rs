//! Extraction strategies, one per file kind.
//!
//! Each strategy takes the raw buffer plus the collaborators it needs and
//! returns trimmed text with strategy-specific metadata. The PDF strategy
//! reuses the image strategy for its OCR path.

pub mod docx;
pub mod image;
pub mod pdf;
pub mod text;

pub use docx::{extract_doc, extract_docx};
pub use self::image::{ImageExtraction, extract_image, round_confidence};
pub use pdf::{PdfExtraction, PdfExtractionOptions, extract_pdf};
pub use text::extract_txt;
