//! Configuration loading and management.
//!
//! [`ExtractionConfig`] holds batch-wide defaults. Each [`BatchItem`](crate::BatchItem)
//! may carry [`ItemOverrides`]; [`ExtractionConfig::resolve`] merges the two into
//! validated [`ItemParameters`].

use crate::types::{Operation, PdfStrategy};
use crate::{DoctextError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the file [`ExtractionConfig::discover`] looks for.
pub const CONFIG_FILE_NAME: &str = "doctext.toml";

/// Batch-wide extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub operation: Operation,

    /// Binary field to read from each item before falling back to the first one.
    #[serde(default = "default_binary_property")]
    pub binary_property: String,

    /// Turn per-item failures into degraded records instead of aborting the batch.
    #[serde(default)]
    pub continue_on_fail: bool,

    #[serde(default)]
    pub ocr: OcrConfig,

    #[serde(default)]
    pub pdf: PdfConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            operation: Operation::default(),
            binary_property: default_binary_property(),
            continue_on_fail: false,
            ocr: OcrConfig::default(),
            pdf: PdfConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language code, `+`-joined for several (`eng+deu`).
    #[serde(default = "default_language")]
    pub language: String,

    /// Greyscale, normalize and sharpen images before recognition.
    #[serde(default)]
    pub preprocess: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            preprocess: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfConfig {
    #[serde(default)]
    pub strategy: PdfStrategy,

    /// Rasterization scale relative to the page size in points.
    #[serde(default = "default_render_scale")]
    pub render_scale: f32,

    /// Minimum trimmed text-layer length that skips OCR under `auto`.
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            strategy: PdfStrategy::default(),
            render_scale: default_render_scale(),
            min_text_length: default_min_text_length(),
        }
    }
}

/// Optional per-item replacements for batch-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocess: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_strategy: Option<PdfStrategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_text_length: Option<usize>,
}

/// Effective parameters for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemParameters {
    pub operation: Operation,
    pub binary_property: String,
    pub ocr_language: String,
    pub preprocess: bool,
    pub pdf_strategy: PdfStrategy,
    pub render_scale: f32,
    pub min_text_length: usize,
}

fn default_binary_property() -> String {
    "data".to_string()
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_render_scale() -> f32 {
    2.0
}

fn default_min_text_length() -> usize {
    50
}

fn validate_language(language: &str) -> Result<()> {
    if language.trim().is_empty() {
        return Err(DoctextError::validation(
            "OCR language cannot be empty. Please specify a valid language code (e.g., 'eng')",
        ));
    }
    Ok(())
}

fn validate_render_scale(scale: f32) -> Result<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(DoctextError::validation(format!(
            "Render scale must be a positive number, got {}",
            scale
        )));
    }
    Ok(())
}

impl ExtractionConfig {
    /// Check batch-wide settings.
    pub fn validate(&self) -> Result<()> {
        if self.binary_property.trim().is_empty() {
            return Err(DoctextError::validation("Binary property name cannot be empty"));
        }
        validate_language(&self.ocr.language)?;
        validate_render_scale(self.pdf.render_scale)
    }

    /// Binary field name for an item, honouring its override.
    pub fn binary_property_for<'a>(&'a self, overrides: &'a ItemOverrides) -> &'a str {
        overrides
            .binary_property
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.binary_property)
    }

    /// Merge item overrides over the batch defaults.
    pub fn resolve(&self, overrides: &ItemOverrides) -> Result<ItemParameters> {
        let params = ItemParameters {
            operation: overrides.operation.unwrap_or(self.operation),
            binary_property: self.binary_property_for(overrides).to_string(),
            ocr_language: overrides
                .ocr_language
                .clone()
                .unwrap_or_else(|| self.ocr.language.clone()),
            preprocess: overrides.preprocess.unwrap_or(self.ocr.preprocess),
            pdf_strategy: overrides.pdf_strategy.unwrap_or(self.pdf.strategy),
            render_scale: overrides.render_scale.unwrap_or(self.pdf.render_scale),
            min_text_length: overrides.min_text_length.unwrap_or(self.pdf.min_text_length),
        };

        validate_language(&params.ocr_language)?;
        validate_render_scale(params.render_scale)?;

        Ok(params)
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DoctextError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| DoctextError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DoctextError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        serde_yaml_ng::from_str(&content)
            .map_err(|e| DoctextError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            DoctextError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| DoctextError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, picking the format from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "toml" => Self::from_toml_file(path),
            "yaml" | "yml" => Self::from_yaml_file(path),
            "json" => Self::from_json_file(path),
            _ => Err(DoctextError::validation(format!(
                "Unsupported config file format: {}. Supported formats: .toml, .yaml, .yml, .json",
                path.display()
            ))),
        }
    }

    /// Discover `doctext.toml` in the current directory or its parents.
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(DoctextError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered configuration file");
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert_eq!(config.operation, Operation::Auto);
        assert_eq!(config.binary_property, "data");
        assert!(!config.continue_on_fail);
        assert_eq!(config.ocr.language, "eng");
        assert!(!config.ocr.preprocess);
        assert_eq!(config.pdf.strategy, PdfStrategy::Auto);
        assert_eq!(config.pdf.render_scale, 2.0);
        assert_eq!(config.pdf.min_text_length, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("doctext.toml");

        fs::write(
            &config_path,
            r#"
operation = "document"
continue_on_fail = true

[ocr]
language = "deu"

[pdf]
strategy = "ocr"
min_text_length = 10
        "#,
        )
        .unwrap();

        let config = ExtractionConfig::from_toml_file(&config_path).unwrap();
        assert_eq!(config.operation, Operation::Document);
        assert!(config.continue_on_fail);
        assert_eq!(config.ocr.language, "deu");
        assert_eq!(config.pdf.strategy, PdfStrategy::Ocr);
        assert_eq!(config.pdf.min_text_length, 10);
        assert_eq!(config.pdf.render_scale, 2.0);
    }

    #[test]
    fn test_from_file_dispatches_on_extension() {
        let dir = tempdir().unwrap();

        let json_path = dir.path().join("config.json");
        fs::write(&json_path, r#"{"binary_property": "upload", "pdf": {"strategy": "text"}}"#).unwrap();
        let config = ExtractionConfig::from_file(&json_path).unwrap();
        assert_eq!(config.binary_property, "upload");
        assert_eq!(config.pdf.strategy, PdfStrategy::Text);

        let yaml_path = dir.path().join("config.yaml");
        fs::write(&yaml_path, "ocr:\n  language: fra\n  preprocess: true\n").unwrap();
        let config = ExtractionConfig::from_file(&yaml_path).unwrap();
        assert_eq!(config.ocr.language, "fra");
        assert!(config.ocr.preprocess);

        let ini_path = dir.path().join("config.ini");
        fs::write(&ini_path, "").unwrap();
        assert!(matches!(
            ExtractionConfig::from_file(&ini_path),
            Err(DoctextError::Validation { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("doctext.toml");
        fs::write(&config_path, "operation = [").unwrap();

        let err = ExtractionConfig::from_toml_file(&config_path).unwrap_err();
        assert!(err.to_string().contains("Invalid TOML"));
        assert!(err.to_string().contains("doctext.toml"));
    }

    #[test]
    #[serial]
    fn test_discover_doctext_toml() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "continue_on_fail = true\n").unwrap();

        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&nested).unwrap();

        let result = std::panic::catch_unwind(|| {
            let config = ExtractionConfig::discover().unwrap();
            assert!(config.is_some());
            assert!(config.unwrap().continue_on_fail);
        });

        std::env::set_current_dir(&original_dir).unwrap();

        if let Err(e) = result {
            std::panic::resume_unwind(e);
        }
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let config = ExtractionConfig::default();
        let overrides = ItemOverrides {
            operation: Some(Operation::Pdf),
            ocr_language: Some("spa".to_string()),
            pdf_strategy: Some(PdfStrategy::Text),
            min_text_length: Some(5),
            ..Default::default()
        };

        let params = config.resolve(&overrides).unwrap();
        assert_eq!(params.operation, Operation::Pdf);
        assert_eq!(params.ocr_language, "spa");
        assert_eq!(params.pdf_strategy, PdfStrategy::Text);
        assert_eq!(params.min_text_length, 5);
        assert_eq!(params.render_scale, 2.0);
        assert_eq!(params.binary_property, "data");
    }

    #[test]
    fn test_resolve_rejects_bad_overrides() {
        let config = ExtractionConfig::default();

        let bad_scale = ItemOverrides {
            render_scale: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(config.resolve(&bad_scale), Err(DoctextError::Validation { .. })));

        let nan_scale = ItemOverrides {
            render_scale: Some(f32::NAN),
            ..Default::default()
        };
        assert!(config.resolve(&nan_scale).is_err());

        let blank_language = ItemOverrides {
            ocr_language: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(config.resolve(&blank_language).is_err());
    }

    #[test]
    fn test_binary_property_override() {
        let config = ExtractionConfig::default();
        let overrides = ItemOverrides {
            binary_property: Some("attachment".to_string()),
            ..Default::default()
        };
        assert_eq!(config.binary_property_for(&overrides), "attachment");
        assert_eq!(config.binary_property_for(&ItemOverrides::default()), "data");
    }
}
