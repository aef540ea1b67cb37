//! doctext command-line interface.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use doctext::core::io::read_binary;
use doctext::{BatchDispatcher, BatchItem, ExtractionConfig, ExtractionResult, Operation, PdfStrategy, detect_file_kind};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOperation {
    /// Detect the file type and pick a strategy
    Auto,
    /// Treat every file as an image
    Ocr,
    /// Treat every file as a PDF
    Pdf,
    /// Treat every file as a Word document
    Document,
}

impl From<CliOperation> for Operation {
    fn from(operation: CliOperation) -> Self {
        match operation {
            CliOperation::Auto => Operation::Auto,
            CliOperation::Ocr => Operation::Ocr,
            CliOperation::Pdf => Operation::Pdf,
            CliOperation::Document => Operation::Document,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPdfStrategy {
    /// Text layer first, OCR when it is too short
    Auto,
    /// Text layer only
    Text,
    /// OCR every page
    Ocr,
}

impl From<CliPdfStrategy> for PdfStrategy {
    fn from(strategy: CliPdfStrategy) -> Self {
        match strategy {
            CliPdfStrategy::Auto => PdfStrategy::Auto,
            CliPdfStrategy::Text => PdfStrategy::Text,
            CliPdfStrategy::Ocr => PdfStrategy::Ocr,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Parser)]
#[command(name = "doctext")]
#[command(version, about = "Extract plain text from images, PDFs, Word documents and text files", long_about = None)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from one or more files
    Extract {
        /// Files to extract, processed in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Configuration file (.toml, .yaml, .yml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum)]
        operation: Option<CliOperation>,

        /// Tesseract language code, e.g. eng or eng+deu
        #[arg(short, long)]
        language: Option<String>,

        #[arg(long, value_enum)]
        pdf_strategy: Option<CliPdfStrategy>,

        /// PDF rasterization scale for OCR
        #[arg(long)]
        render_scale: Option<f32>,

        /// Minimum text-layer length that skips OCR under the auto PDF strategy
        #[arg(long)]
        min_text_length: Option<usize>,

        /// Enhance images before OCR
        #[arg(long)]
        preprocess: bool,

        /// Report failed files in the output instead of stopping
        #[arg(long)]
        continue_on_fail: bool,

        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Print the detected file type of each file
    Detect {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Flag values layered over the loaded configuration.
#[derive(Debug, Default)]
struct ConfigOverrides {
    operation: Option<CliOperation>,
    language: Option<String>,
    pdf_strategy: Option<CliPdfStrategy>,
    render_scale: Option<f32>,
    min_text_length: Option<usize>,
    preprocess: bool,
    continue_on_fail: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `--config` if given, else a discovered `doctext.toml`, else defaults.
fn load_config(path: Option<&Path>) -> Result<ExtractionConfig> {
    match path {
        Some(path) => ExtractionConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(ExtractionConfig::discover()
            .context("Failed to discover doctext.toml")?
            .unwrap_or_default()),
    }
}

fn apply_overrides(mut config: ExtractionConfig, overrides: ConfigOverrides) -> ExtractionConfig {
    if let Some(operation) = overrides.operation {
        config.operation = operation.into();
    }
    if let Some(language) = overrides.language {
        config.ocr.language = language;
    }
    if let Some(strategy) = overrides.pdf_strategy {
        config.pdf.strategy = strategy.into();
    }
    if let Some(scale) = overrides.render_scale {
        config.pdf.render_scale = scale;
    }
    if let Some(min_text_length) = overrides.min_text_length {
        config.pdf.min_text_length = min_text_length;
    }
    if overrides.preprocess {
        config.ocr.preprocess = true;
    }
    if overrides.continue_on_fail {
        config.continue_on_fail = true;
    }
    config
}

fn format_text(results: &[ExtractionResult]) -> String {
    let mut out = String::new();

    for result in results {
        match (&result.error, result.method) {
            (Some(error), _) => {
                out.push_str(&format!("==> {} [error]\n{}\n\n", result.file_name, error));
            }
            (None, Some(method)) => {
                let mut details = vec![method.to_string()];
                if let Some(pages) = result.page_count {
                    details.push(format!("{} pages", pages));
                }
                if let Some(confidence) = result.confidence {
                    details.push(format!("confidence {}%", confidence));
                }
                if let Some(language) = &result.language {
                    details.push(language.clone());
                }
                out.push_str(&format!(
                    "==> {} [{}]\n{}\n\n",
                    result.file_name,
                    details.join(", "),
                    result.text.as_deref().unwrap_or_default()
                ));
            }
            (None, None) => {}
        }
    }

    out
}

async fn extract(files: Vec<PathBuf>, config: ExtractionConfig, format: OutputFormat) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let mut items = Vec::with_capacity(files.len());
    for path in &files {
        let binary = read_binary(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        items.push(BatchItem::with_binary(config.binary_property.clone(), binary));
    }

    let results = BatchDispatcher::new(config).run(&items).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Text => print!("{}", format_text(&results)),
    }

    Ok(())
}

async fn detect(files: Vec<PathBuf>) -> Result<()> {
    for path in &files {
        let binary = read_binary(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let kind = detect_file_kind(binary.mime_type.as_deref(), binary.file_name.as_deref());

        println!(
            "{}: {} ({})",
            path.display(),
            kind.map(|k| k.as_str()).unwrap_or("unsupported"),
            binary.mime_type_or_default()
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Extract {
            files,
            config,
            operation,
            language,
            pdf_strategy,
            render_scale,
            min_text_length,
            preprocess,
            continue_on_fail,
            format,
        } => {
            let loaded = load_config(config.as_deref())?;
            let config = apply_overrides(
                loaded,
                ConfigOverrides {
                    operation,
                    language,
                    pdf_strategy,
                    render_scale,
                    min_text_length,
                    preprocess,
                    continue_on_fail,
                },
            );
            extract(files, config, format).await
        }
        Commands::Detect { files } => detect(files).await,
    }
}
