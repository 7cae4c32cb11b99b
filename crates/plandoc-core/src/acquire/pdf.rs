//! Embedded PDF text layer, read with lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use super::{join_pages, Result, TextSource};
use crate::error::AcquisitionError;

/// Reads the text layer of digitally produced PDFs.
///
/// Scanned PDFs carry no text layer; they yield empty pages and need an
/// external OCR step.
#[derive(Debug, Clone, Copy)]
pub struct PdfTextLayer {
    page_markers: bool,
}

impl PdfTextLayer {
    pub fn new() -> Self {
        Self { page_markers: true }
    }

    /// Prefix each page with a `--- Page N ---` marker.
    pub fn with_page_markers(mut self, markers: bool) -> Self {
        self.page_markers = markers;
        self
    }

    /// Extract the text layer from PDF bytes.
    pub fn extract(&self, data: &[u8]) -> Result<String> {
        let (doc, data) = load_document(data)?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(AcquisitionError::NoPages);
        }

        let pages: Vec<String> = page_numbers
            .iter()
            .map(|&number| match doc.extract_text(&[number]) {
                Ok(text) => text.trim().to_string(),
                Err(e) => {
                    debug!("lopdf could not read page {}: {}", number, e);
                    String::new()
                }
            })
            .collect();

        if pages.iter().any(|p| !p.is_empty()) {
            debug!("Read text layer of {} pages", pages.len());
            return Ok(join_pages(&pages, self.page_markers));
        }

        // lopdf misses text in some font encodings; pdf-extract handles more of
        // them but only yields the whole document.
        debug!("Page text empty, falling back to pdf-extract");
        let text = pdf_extract::extract_text_from_mem(&data)
            .map_err(|e| AcquisitionError::Pdf(e.to_string()))?;
        let text = text.trim();
        if text.is_empty() {
            warn!("PDF has no text layer ({} pages)", pages.len());
            return Ok(String::new());
        }
        Ok(join_pages(&[text], self.page_markers))
    }
}

impl Default for PdfTextLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for PdfTextLayer {
    fn read_text(&self, path: &Path) -> Result<String> {
        let data = std::fs::read(path).map_err(|source| AcquisitionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.extract(&data)
    }
}

/// Parse the document, decrypting PDFs protected by an empty user password.
/// Returns the bytes pdf-extract should read.
fn load_document(data: &[u8]) -> Result<(Document, Vec<u8>)> {
    let mut doc = Document::load_mem(data).map_err(|e| AcquisitionError::Pdf(e.to_string()))?;

    if !doc.is_encrypted() {
        return Ok((doc, data.to_vec()));
    }

    if doc.decrypt("").is_err() {
        return Err(AcquisitionError::Encrypted);
    }
    debug!("Decrypted PDF with empty password");

    let mut decrypted = Vec::new();
    doc.save_to(&mut decrypted)
        .map_err(|e| AcquisitionError::Pdf(format!("failed to save decrypted PDF: {}", e)))?;
    Ok((doc, decrypted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_pdf() {
        let result = PdfTextLayer::new().extract(b"At:\n42 High Street");
        assert!(matches!(result, Err(AcquisitionError::Pdf(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfTextLayer::new().read_text(&dir.path().join("missing.pdf"));
        assert!(matches!(result, Err(AcquisitionError::Read { .. })));
    }
}
