//! Itinerary export to PDF
//!
//! The generated Markdown is flattened into headings, paragraphs, list items
//! and table rows, laid out on A4 pages, written to the export directory and
//! read back so callers get both the path and the bytes.

mod markdown;
mod pdf;

pub use markdown::{Block, markdown_blocks, pdf_safe};
pub use pdf::render_pdf;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Errors exporting an itinerary
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No itinerary to export yet")]
    NothingToExport,

    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `{destination}_Adventure.pdf`, with path separators replaced
pub fn pdf_file_name(destination: &str) -> String {
    let safe: String = destination
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':' | '\0') { '_' } else { c })
        .collect();
    format!("{}_Adventure.pdf", safe)
}

/// Render, write to `dir`, and read the file back
pub fn export_pdf(dir: &Path, markdown: &str, destination: &str) -> Result<(PathBuf, Vec<u8>), ExportError> {
    debug!(?dir, %destination, "export_pdf: called");
    let bytes = render_pdf(markdown, destination)?;

    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(pdf_file_name(destination));
    fs::write(&path, &bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    let written = fs::read(&path).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), bytes = written.len(), "Exported itinerary PDF");
    Ok((path, written))
}
