//! Word document backends.
//!
//! - [`docx`] parses `.docx` with `docx-lite`
//! - [`libreoffice`] converts legacy `.doc` to `.docx` with headless LibreOffice
//!
//! Requires the `office` feature.

#[cfg(feature = "office")]
pub mod docx;
#[cfg(feature = "office")]
pub mod libreoffice;
