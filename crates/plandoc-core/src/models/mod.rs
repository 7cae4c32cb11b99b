//! Data models and configuration.

pub mod config;
pub mod record;

pub use config::PlandocConfig;
pub use record::{ExtractedField, ExtractionMethod, ExtractionRecord, FieldName, RecordRow};
