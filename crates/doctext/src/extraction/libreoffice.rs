//! Legacy `.doc` support through LibreOffice.
//!
//! `.doc` files are converted to `.docx` with `soffice --headless --convert-to
//! docx` and the result is parsed with docx-lite.
//!
//! # System Requirement
//!
//! LibreOffice must be installed:
//! - **macOS**: `brew install --cask libreoffice`
//! - **Linux**: `apt install libreoffice` or `dnf install libreoffice`
//! - **Windows**: `winget install LibreOffice.LibreOffice`
//!
//! Set `DOCTEXT_LIBREOFFICE_PATH` to point at a custom `soffice` executable.

use crate::plugins::{DocumentParser, Plugin};
use crate::{DoctextError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

/// Default timeout for a single conversion, in seconds.
pub const DEFAULT_CONVERSION_TIMEOUT: u64 = 300;

/// Removes a temporary directory when dropped.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    async fn new(path: PathBuf) -> Result<Self> {
        fs::create_dir_all(&path).await?;
        Ok(Self { path })
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

fn libreoffice_install_message() -> String {
    "LibreOffice (soffice/libreoffice) is required for legacy Word (.doc) support. \
Install: macOS: 'brew install --cask libreoffice', \
Linux: 'apt install libreoffice', \
Windows: 'winget install LibreOffice.LibreOffice'. \
If LibreOffice is installed in a custom location, set the DOCTEXT_LIBREOFFICE_PATH environment variable to the soffice executable."
        .to_string()
}

fn soffice_candidates() -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    let mut push_candidate = |path: PathBuf| {
        if seen.insert(path.clone()) {
            candidates.push(path);
        }
    };

    for var in ["DOCTEXT_LIBREOFFICE_PATH", "SOFFICE_PATH", "LIBREOFFICE_PATH"] {
        if let Some(value) = env::var_os(var).filter(|v| !v.is_empty()) {
            push_candidate(PathBuf::from(value));
        }
    }

    if cfg!(target_os = "macos") {
        push_candidate(PathBuf::from("/Applications/LibreOffice.app/Contents/MacOS/soffice"));
    }

    if cfg!(target_os = "windows") {
        push_candidate(PathBuf::from("C:\\Program Files\\LibreOffice\\program\\soffice.exe"));
    }

    if let Some(path_env) = env::var_os("PATH") {
        for dir in env::split_paths(&path_env) {
            push_candidate(dir.join("soffice"));
            push_candidate(dir.join("libreoffice"));
            push_candidate(dir.join("soffice.exe"));
        }
    }

    candidates
}

/// Find the first existing `soffice` executable.
pub fn locate_soffice_binary() -> Result<PathBuf> {
    soffice_candidates()
        .into_iter()
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| DoctextError::MissingDependency(libreoffice_install_message()))
}

/// Convert `input_path` to `target_format` inside `output_dir` and return the converted bytes.
pub async fn convert_office_doc(
    soffice_path: &Path,
    input_path: &Path,
    output_dir: &Path,
    target_format: &str,
    timeout_seconds: u64,
) -> Result<Vec<u8>> {
    let child = Command::new(soffice_path)
        .arg("--headless")
        .arg("--convert-to")
        .arg(target_format)
        .arg("--outdir")
        .arg(output_dir)
        .arg(input_path)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            DoctextError::MissingDependency(format!(
                "Failed to execute LibreOffice at '{}': {}. {}",
                soffice_path.display(),
                e,
                libreoffice_install_message()
            ))
        })?;

    let output = match timeout(Duration::from_secs(timeout_seconds), child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            return Err(DoctextError::extraction_with_source("Failed to wait for LibreOffice", e));
        }
        Err(_) => {
            return Err(DoctextError::extraction(format!(
                "LibreOffice conversion timed out after {} seconds",
                timeout_seconds
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        return Err(DoctextError::extraction(format!(
            "LibreOffice conversion failed with return code {}: {}",
            output.status.code().unwrap_or(-1),
            if !stderr.is_empty() { stderr } else { stdout }
        )));
    }

    let input_stem = input_path
        .file_stem()
        .ok_or_else(|| DoctextError::extraction("Invalid input file name"))?;
    let expected_output = output_dir.join(format!("{}.{}", input_stem.to_string_lossy(), target_format));

    let converted = fs::read(&expected_output).await.map_err(|e| {
        DoctextError::extraction_with_source("LibreOffice conversion completed but output file not found", e)
    })?;

    if converted.is_empty() {
        return Err(DoctextError::extraction("LibreOffice conversion produced empty file"));
    }

    Ok(converted)
}

/// Convert `.doc` bytes to `.docx` bytes.
pub async fn convert_doc_to_docx(doc_bytes: &[u8], timeout_seconds: u64) -> Result<Vec<u8>> {
    let soffice_path = locate_soffice_binary()?;

    let unique_id = uuid::Uuid::new_v4();
    let temp_dir = env::temp_dir();
    let input_dir = TempDir::new(temp_dir.join(format!("doctext_doc_{}", unique_id))).await?;
    let output_dir = TempDir::new(temp_dir.join(format!("doctext_doc_{}_out", unique_id))).await?;

    let input_path = input_dir.path.join("input.doc");
    fs::write(&input_path, doc_bytes).await?;

    tracing::debug!(soffice = %soffice_path.display(), bytes = doc_bytes.len(), "Converting DOC to DOCX");
    convert_office_doc(&soffice_path, &input_path, &output_dir.path, "docx", timeout_seconds).await
}

/// [`DocumentParser`] for legacy `.doc` files.
#[derive(Debug, Clone, Copy)]
pub struct LegacyDocParser {
    pub timeout_seconds: u64,
}

impl Default for LegacyDocParser {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_CONVERSION_TIMEOUT,
        }
    }
}

impl Plugin for LegacyDocParser {
    fn name(&self) -> &str {
        "libreoffice"
    }

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[async_trait]
impl DocumentParser for LegacyDocParser {
    async fn parse(&self, document: &[u8]) -> Result<String> {
        let docx = convert_doc_to_docx(document, self.timeout_seconds).await?;
        super::docx::extract_text(&docx)
    }
}
