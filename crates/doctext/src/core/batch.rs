//! Batch dispatch: one extraction result per input item, in input order.
//!
//! [`BatchDispatcher::run`] walks the items sequentially. For every item it
//! resolves the binary payload, detects the file kind, starts the shared OCR
//! engine when the kind needs it and hands the buffer to the matching
//! strategy. The engine is released after the loop on every exit path.
//!
//! # Failure isolation
//!
//! With `continue_on_fail` an item error becomes a degraded record carrying
//! only `error`, `fileName` and `mimeType`. Without it the first error aborts
//! the batch. `EngineInit` errors always abort.

use crate::core::config::{ExtractionConfig, ItemParameters};
use crate::core::routing::{requires_ocr, resolve_file_kind};
use crate::extractors::{
    PdfExtractionOptions, extract_doc, extract_docx, extract_image, extract_pdf, extract_txt,
};
use crate::ocr::OcrEngineLifecycle;
use crate::plugins::{ExtractionBackends, OcrEngine};
use crate::types::{BatchItem, BinaryData, ExtractionMethod, ExtractionResult, FileKind};
use crate::{DoctextError, Result};
use std::sync::Arc;

/// Runs batches of items through the extraction strategies.
#[derive(Debug, Clone)]
pub struct BatchDispatcher {
    config: ExtractionConfig,
    backends: ExtractionBackends,
}

impl BatchDispatcher {
    /// Dispatcher using the backends compiled in through cargo features.
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            backends: ExtractionBackends::default(),
        }
    }

    pub fn with_backends(mut self, backends: ExtractionBackends) -> Self {
        self.backends = backends;
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn backends(&self) -> &ExtractionBackends {
        &self.backends
    }

    /// Extract every item and return the results in input order.
    ///
    /// # Errors
    ///
    /// - `DoctextError::Validation` - the batch configuration is invalid
    /// - `DoctextError::EngineInit` - the OCR engine could not be started
    /// - any item error when `continue_on_fail` is disabled
    pub async fn run(&self, items: &[BatchItem]) -> Result<Vec<ExtractionResult>> {
        self.config.validate()?;

        let mut lifecycle = OcrEngineLifecycle::new(Arc::clone(&self.backends.ocr_factory));
        let outcome = self.process_items(items, &mut lifecycle).await;

        if let Err(e) = lifecycle.terminate().await {
            tracing::warn!("Failed to terminate OCR engine: {}", e);
        }

        outcome
    }

    async fn process_items(
        &self,
        items: &[BatchItem],
        lifecycle: &mut OcrEngineLifecycle,
    ) -> Result<Vec<ExtractionResult>> {
        let mut results = Vec::with_capacity(items.len());
        let mut failed = 0usize;

        for (index, item) in items.iter().enumerate() {
            match self.process_item(index, item, lifecycle).await {
                Ok(result) => results.push(result),
                Err(e) if e.aborts_batch() || !self.config.continue_on_fail => {
                    tracing::debug!(index, error = %e, "Aborting batch");
                    return Err(e);
                }
                Err(e) => {
                    let (file_name, mime_type) = self.describe(item);
                    tracing::warn!(index, file_name, "Item failed, continuing: {}", e);
                    failed += 1;
                    results.push(ExtractionResult::failed(file_name, mime_type, &e));
                }
            }
        }

        tracing::debug!(items = items.len(), failed, "Batch complete");
        Ok(results)
    }

    /// Best-effort file name and MIME type for a degraded record.
    fn describe<'a>(&self, item: &'a BatchItem) -> (&'a str, &'a str) {
        item.resolve_binary(self.config.binary_property_for(&item.overrides))
            .map(|(_, binary)| (binary.file_name_or_default(), binary.mime_type_or_default()))
            .unwrap_or(("unknown", ""))
    }

    async fn process_item(
        &self,
        index: usize,
        item: &BatchItem,
        lifecycle: &mut OcrEngineLifecycle,
    ) -> Result<ExtractionResult> {
        let params = self.config.resolve(&item.overrides)?;
        let (field, binary) = item
            .resolve_binary(&params.binary_property)
            .ok_or(DoctextError::MissingBinary { item_index: index })?;

        let file_name = binary.file_name_or_default();
        let mime_type = binary.mime_type_or_default();

        let kind = resolve_file_kind(params.operation, mime_type, file_name).ok_or_else(|| {
            DoctextError::UnsupportedType(if mime_type.is_empty() {
                file_name.to_string()
            } else {
                mime_type.to_string()
            })
        })?;

        tracing::debug!(
            index,
            field,
            file_name,
            mime_type,
            operation = ?params.operation,
            kind = %kind,
            "Routing item"
        );

        let engine = if requires_ocr(kind, params.pdf_strategy) {
            lifecycle.acquire_if_available(&params.ocr_language).await?
        } else {
            None
        };

        let mut result = ExtractionResult {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            text: None,
            file_type: Some(kind),
            page_count: None,
            confidence: None,
            language: None,
            method: None,
            error: None,
        };

        match kind {
            FileKind::Image => {
                let engine = engine.ok_or_else(ocr_unavailable)?;
                let image = extract_image(
                    &binary.data,
                    engine,
                    self.backends.preprocessor.as_ref(),
                    params.preprocess,
                )
                .await?;

                result.text = Some(image.text);
                result.confidence = Some(image.confidence);
                result.language = Some(engine.language().to_string());
                result.method = Some(ExtractionMethod::Ocr);
            }
            FileKind::Pdf => {
                self.extract_pdf_item(binary, &params, engine, &mut result).await?;
            }
            FileKind::Docx => {
                result.text = Some(extract_docx(&binary.data, self.backends.docx.as_ref()).await?);
                result.method = Some(ExtractionMethod::Docx);
            }
            FileKind::Doc => {
                result.text = Some(extract_doc(&binary.data, self.backends.doc.as_ref()).await?);
                result.method = Some(ExtractionMethod::Doc);
            }
            FileKind::Text => {
                result.text = Some(extract_txt(&binary.data));
                result.method = Some(ExtractionMethod::Txt);
            }
        }

        Ok(result)
    }

    async fn extract_pdf_item(
        &self,
        binary: &BinaryData,
        params: &ItemParameters,
        engine: Option<&dyn OcrEngine>,
        result: &mut ExtractionResult,
    ) -> Result<()> {
        let options = PdfExtractionOptions {
            strategy: params.pdf_strategy,
            preprocess: params.preprocess,
            render_scale: params.render_scale,
            min_text_length: params.min_text_length,
        };

        if engine.is_none() && !params.pdf_strategy.reads_text_layer() {
            return Err(ocr_unavailable());
        }

        let pdf = extract_pdf(&binary.data, &options, engine, &self.backends).await?;
        tracing::debug!(method = %pdf.method, page_count = pdf.page_count, "Extracted PDF");

        if pdf.method.is_ocr() {
            result.language = engine.map(|engine| engine.language().to_string());
        }
        result.text = Some(pdf.text);
        result.page_count = Some(pdf.page_count);
        result.confidence = pdf.confidence;
        result.method = Some(pdf.method);

        Ok(())
    }
}

fn ocr_unavailable() -> DoctextError {
    DoctextError::MissingDependency(
        "OCR support is not available. Rebuild doctext with the `ocr` feature enabled.".to_string(),
    )
}
