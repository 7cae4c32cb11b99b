//! OCR output text files.

use std::path::Path;

use tracing::trace;

use super::{Result, TextSource};
use crate::error::AcquisitionError;

/// Reads text files written by the OCR step.
///
/// Decoding is strict: a file that is not valid UTF-8 is rejected rather
/// than repaired, so a corrupted file surfaces as a failed document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessedTextReader;

impl ProcessedTextReader {
    pub fn new() -> Self {
        Self
    }
}

impl TextSource for ProcessedTextReader {
    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|source| AcquisitionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        trace!("Read {} bytes from {}", bytes.len(), path.display());

        String::from_utf8(bytes).map_err(|e| AcquisitionError::Encoding {
            path: path.to_path_buf(),
            reason: e.utf8_error().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "At:\nCafé Lane").unwrap();

        assert_eq!(ProcessedTextReader::new().read_text(&path).unwrap(), "At:\nCafé Lane");
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, [0x41, 0xff, 0xfe, 0x42]).unwrap();

        assert!(matches!(
            ProcessedTextReader::new().read_text(&path),
            Err(AcquisitionError::Encoding { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ProcessedTextReader::new().read_text(&dir.path().join("none.txt")),
            Err(AcquisitionError::Read { .. })
        ));
    }
}
