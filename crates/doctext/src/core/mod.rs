//! Core dispatch and orchestration.
//!
//! - **Detection** (`mime`): MIME type and file extension to [`FileKind`](crate::FileKind)
//! - **Routing** (`routing`): operation mode to file kind, and the OCR trigger rule
//! - **Configuration** (`config`): batch defaults, per-item overrides, file loading
//! - **Batch** (`batch`): the sequential dispatcher that produces one result per item
//! - **I/O** (`io`): building binary payloads from files on disk
//!
//! # Example
//!
//! ```rust,no_run
//! use doctext::{BatchDispatcher, BatchItem, ExtractionConfig};
//!
//! # async fn example() -> doctext::Result<()> {
//! let binary = doctext::core::io::read_binary("scan.pdf").await?;
//! let items = vec![BatchItem::with_binary("data", binary)];
//!
//! let results = BatchDispatcher::new(ExtractionConfig::default()).run(&items).await?;
//! println!("{:?}", results[0].text);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod io;
pub mod mime;
pub mod routing;

pub use batch::BatchDispatcher;
pub use config::{ExtractionConfig, ItemOverrides, ItemParameters, OcrConfig, PdfConfig};
pub use mime::detect_file_kind;
pub use routing::{requires_ocr, resolve_file_kind};
