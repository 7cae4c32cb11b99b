//! Core library for planning decision document extraction.
//!
//! This crate provides:
//! - Text acquisition from OCR output files and PDF text layers
//! - Named-entity recognition (built-in gazetteer, optional ONNX models)
//! - Field extraction (reference, date, site address, decision, applicant)
//! - Batch orchestration and JSON/CSV export of extraction records

pub mod acquire;
pub mod batch;
pub mod error;
pub mod export;
pub mod extract;
pub mod models;
pub mod ner;

pub use acquire::{discover_sources, PdfTextLayer, ProcessedTextReader, SourceDocument, TextSource};
pub use batch::{BatchFailure, BatchReport, BatchRunner};
pub use error::{AcquisitionError, ExportError, PlandocError, RecognitionError, Result};
pub use extract::{DocumentParser, ExtractionResult, PlanningDocumentParser};
pub use models::{
    ExtractedField, ExtractionMethod, ExtractionRecord, FieldName, PlandocConfig, RecordRow,
};
pub use ner::{Entity, EntityLabel, EntityRecognizer, GazetteerRecognizer, LazyRecognizer};

/// Re-export inference types.
#[cfg(feature = "onnx")]
pub use plandoc_inference::{InferenceBackend, OrtBackend};
