//! PDF backends built on `pdfium-render`.
//!
//! - [`PdfiumTextLayer`] reads the embedded text of every page
//! - [`PdfiumRasterizer`] renders pages to PNG for OCR
//!
//! Pdfium is bound lazily on first use from the system library. Requires the
//! `pdf` feature.

#[cfg(feature = "pdf")]
mod bindings;
#[cfg(feature = "pdf")]
pub mod error;
#[cfg(feature = "pdf")]
pub mod rendering;
#[cfg(feature = "pdf")]
pub mod text;

#[cfg(feature = "pdf")]
pub use error::PdfError;
#[cfg(feature = "pdf")]
pub use rendering::{PdfiumRasterizer, render_pages_to_png};
#[cfg(feature = "pdf")]
pub use text::{PdfiumTextLayer, extract_text_from_pdf};
