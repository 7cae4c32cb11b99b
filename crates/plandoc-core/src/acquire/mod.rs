//! Text acquisition: turning source files into document text.
//!
//! Extraction only ever sees a string. Where that string comes from (an OCR
//! output file, the text layer of a PDF) is decided here.

mod pdf;
mod text;

pub use pdf::PdfTextLayer;
pub use text::ProcessedTextReader;

use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use tracing::debug;

use crate::error::AcquisitionError;

/// Result type for acquisition operations.
pub type Result<T> = std::result::Result<T, AcquisitionError>;

/// Trait for producers of document text.
pub trait TextSource: Send + Sync {
    /// Read the full text of the document at `path`.
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// A source file discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// File name, used as the record identifier.
    pub filename: String,
    /// Full path.
    pub path: PathBuf,
}

impl SourceDocument {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { filename, path }
    }
}

/// Files with `extension` directly inside `dir`, sorted by file name.
///
/// A missing directory is an error; a directory without matching files
/// yields an empty list.
pub fn discover_sources(dir: &Path, extension: &str) -> Result<Vec<SourceDocument>> {
    if !dir.is_dir() {
        return Err(AcquisitionError::MissingDirectory(dir.to_path_buf()));
    }

    let extension = extension.trim_start_matches('.');
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(extension)
    );
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let paths = glob_with(&pattern, options).map_err(|e| AcquisitionError::Pattern {
        pattern: pattern.clone(),
        reason: e.to_string(),
    })?;

    let mut sources: Vec<SourceDocument> = paths
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .map(SourceDocument::from_path)
        .collect();

    sources.sort_by(|a, b| a.filename.cmp(&b.filename));
    debug!(
        "Found {} .{} files in {}",
        sources.len(),
        extension,
        dir.display()
    );
    Ok(sources)
}

/// Marker line opening page `number` (1-based).
pub fn page_marker(number: usize) -> String {
    format!("--- Page {} ---", number)
}

/// Join page texts into one document, optionally prefixing page markers.
/// Pages are separated by a blank line.
pub fn join_pages<S: AsRef<str>>(pages: &[S], markers: bool) -> String {
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| {
            if markers {
                format!("{}\n{}", page_marker(i + 1), page.as_ref())
            } else {
                page.as_ref().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
