use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::Local;
use docx_rs::{Docx, Paragraph, Run};
use tracing::info;

use crate::errors::SummarizerError;

pub const TEXT_EXTENSION: &str = "txt";
pub const DOCX_EXTENSION: &str = "docx";

/// Prefill for a save prompt, e.g. `summary-20261018-141500.txt`.
#[must_use]
pub fn default_file_name(kind: &str, extension: &str) -> String {
    format!("{}-{}.{}", kind, Local::now().format("%Y%m%d-%H%M%S"), extension)
}

/// Appends `extension` when `path` has none.
#[must_use]
pub fn ensure_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}

/// Writes `content` verbatim as UTF-8.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_text(path: &Path, content: &str) -> Result<(), SummarizerError> {
    fs::write(path, content)?;
    info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Writes a word-processor document holding `content` as a single paragraph.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the document cannot be packed.
pub fn export_docx(path: &Path, content: &str) -> Result<(), SummarizerError> {
    let file = File::create(path)?;
    Docx::new()
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(content)))
        .build()
        .pack(file)
        .map_err(|e| SummarizerError::ExportError(format!("{}: {e}", path.display())))?;
    info!("Exported document to {}", path.display());
    Ok(())
}
