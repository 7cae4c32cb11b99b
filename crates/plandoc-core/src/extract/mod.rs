//! Planning decision field extraction module.

pub mod address;
pub mod applicant;
pub mod confidence;
mod parser;
pub mod rules;

pub use address::extract_address;
pub use applicant::extract_applicant;
pub use parser::{ExtractionResult, PlanningDocumentParser};

/// Trait for document parsers.
///
/// Parsing never fails: a field that cannot be found is recorded as absent.
pub trait DocumentParser: Send + Sync {
    /// Extract a record from the text of one document.
    fn parse(&self, filename: &str, text: &str) -> ExtractionResult;
}
