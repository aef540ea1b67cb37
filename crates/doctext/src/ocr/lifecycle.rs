//! Per-batch OCR engine lifecycle.
//!
//! Starting an OCR engine is expensive (Tesseract loads its language data),
//! so a batch shares one engine across every item that needs recognition.
//! [`OcrEngineLifecycle`] creates it on first use and tears it down exactly
//! once:
//!
//! ```text
//! Uninitialized --acquire--> Ready --terminate--> Terminated
//!       \______________terminate_______________/
//! ```
//!
//! A lifecycle never returns to `Ready`; each batch builds a fresh one.
//!
//! # Logging
//!
//! - `INFO`: engine start and shutdown
//! - `DEBUG`: engine reuse
//! - `WARN`: language mismatches, shutdown failures, drop-time cleanup

use crate::plugins::{OcrEngine, OcrEngineFactory};
use crate::{DoctextError, Result};
use std::sync::Arc;

/// Observable state of an [`OcrEngineLifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Uninitialized,
    Ready,
    Terminated,
}

enum EngineState {
    Uninitialized,
    Ready(Arc<dyn OcrEngine>),
    Terminated,
}

/// Lazily creates one OCR engine and guarantees it is released once.
pub struct OcrEngineLifecycle {
    factory: Arc<dyn OcrEngineFactory>,
    state: EngineState,
}

impl OcrEngineLifecycle {
    pub fn new(factory: Arc<dyn OcrEngineFactory>) -> Self {
        Self {
            factory,
            state: EngineState::Uninitialized,
        }
    }

    pub fn status(&self) -> EngineStatus {
        match self.state {
            EngineState::Uninitialized => EngineStatus::Uninitialized,
            EngineState::Ready(_) => EngineStatus::Ready,
            EngineState::Terminated => EngineStatus::Terminated,
        }
    }

    /// Borrow the engine, creating it for `language` on first use.
    ///
    /// Once running, the engine keeps its original language; a different
    /// `language` is logged and ignored.
    ///
    /// # Errors
    ///
    /// - `DoctextError::EngineInit` - the factory failed, or the lifecycle was
    ///   already terminated
    pub async fn acquire(&mut self, language: &str) -> Result<&dyn OcrEngine> {
        if let EngineState::Uninitialized = self.state {
            tracing::info!(factory = self.factory.name(), language, "Starting OCR engine");
            let engine = self.factory.create(language).await.map_err(|e| match e {
                err @ DoctextError::EngineInit { .. } => err,
                other => DoctextError::engine_init_with_source(
                    format!("Failed to start OCR engine for language '{}'", language),
                    other,
                ),
            })?;
            self.state = EngineState::Ready(engine);
        } else if let EngineState::Ready(engine) = &self.state {
            tracing::debug!(engine = engine.name(), "Reusing OCR engine");
        }

        match &self.state {
            EngineState::Ready(engine) => {
                if engine.language() != language {
                    tracing::warn!(
                        requested = language,
                        active = engine.language(),
                        "OCR engine already running with a different language"
                    );
                }
                Ok(engine.as_ref())
            }
            EngineState::Terminated => Err(DoctextError::engine_init(
                "OCR engine was already terminated for this batch",
            )),
            EngineState::Uninitialized => Err(DoctextError::engine_init("OCR engine did not start")),
        }
    }

    /// Like [`acquire`](Self::acquire), but `None` when the factory cannot
    /// produce engines in this build. The lifecycle stays uninitialized.
    pub async fn acquire_if_available(&mut self, language: &str) -> Result<Option<&dyn OcrEngine>> {
        if !self.factory.is_available() {
            tracing::debug!(factory = self.factory.name(), "OCR backend unavailable, continuing without engine");
            return Ok(None);
        }
        self.acquire(language).await.map(Some)
    }

    /// Release the engine if one was created. Idempotent.
    pub async fn terminate(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, EngineState::Terminated) {
            EngineState::Ready(engine) => {
                tracing::info!(engine = engine.name(), "Terminating OCR engine");
                engine.terminate().await
            }
            EngineState::Uninitialized | EngineState::Terminated => Ok(()),
        }
    }
}

impl Drop for OcrEngineLifecycle {
    fn drop(&mut self) {
        // Reached with a live engine only when the batch future was cancelled or unwound.
        if let EngineState::Ready(engine) = std::mem::replace(&mut self.state, EngineState::Terminated) {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    tracing::warn!(engine = engine.name(), "OCR engine dropped while running, terminating");
                    handle.spawn(async move {
                        if let Err(e) = engine.terminate().await {
                            tracing::warn!("Failed to terminate OCR engine: {}", e);
                        }
                    });
                }
                Err(_) => {
                    tracing::warn!(
                        engine = engine.name(),
                        "OCR engine dropped outside a tokio runtime, skipping terminate"
                    );
                }
            }
        }
    }
}
