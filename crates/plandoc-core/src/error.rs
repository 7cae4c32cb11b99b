//! Error types for the plandoc-core library.
//!
//! Field extraction never fails: a field that cannot be found is simply
//! absent. The errors below cover the collaborators around extraction (text
//! acquisition, model loading, export) and are reported by the batch driver.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the plandoc library.
#[derive(Error, Debug)]
pub enum PlandocError {
    /// Text acquisition error.
    #[error("acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    /// Entity recognition error.
    #[error("entity recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// Export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while producing document text.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// The source file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source text is not valid UTF-8.
    #[error("{path} is not valid UTF-8: {reason}")]
    Encoding { path: PathBuf, reason: String },

    /// The source directory does not exist.
    #[error("source directory not found: {0}")]
    MissingDirectory(PathBuf),

    /// The discovery pattern for a directory could not be built.
    #[error("invalid source pattern {pattern}: {reason}")]
    Pattern { pattern: String, reason: String },

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to entity recognition.
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// A model artifact is missing from the model directory.
    #[error("missing model file: {0}")]
    MissingArtifact(PathBuf),

    /// Failed to load the model, tokenizer or label map.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The configured backend was not compiled in.
    #[error("recognizer backend '{0}' is not available in this build")]
    BackendUnavailable(String),

    /// Tokenization or inference failed for a document.
    #[error("recognition failed: {0}")]
    Failed(String),

    /// Inference error from the inference layer.
    #[cfg(feature = "onnx")]
    #[error("inference error: {0}")]
    Inference(#[from] plandoc_inference::InferenceError),
}

/// Errors raised while writing or reading output records.
#[derive(Error, Debug)]
pub enum ExportError {
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the plandoc library.
pub type Result<T> = std::result::Result<T, PlandocError>;
