//! Base plugin trait definition.
//!
//! Every collaborator the dispatcher talks to implements [`Plugin`] so it can
//! be named in logs and error messages.

/// Metadata shared by all backends.
///
/// Backends must be thread-safe (`Send + Sync`); they are stored as
/// `Arc<dyn Trait>` inside [`ExtractionBackends`](super::ExtractionBackends).
pub trait Plugin: Send + Sync {
    /// Short, stable identifier such as `"tesseract"` or `"pdfium"`.
    fn name(&self) -> &str;

    /// Version of the backend or of the library it wraps.
    fn version(&self) -> String;
}
