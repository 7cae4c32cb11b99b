//! Planning decision parser combining grammar rules and entity recognition.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::PlandocConfig;
use crate::models::record::{ExtractionRecord, FieldName};
use crate::ner::{EntityRecognizer, EntityWindow, LazyRecognizer};

use super::address::extract_address;
use super::applicant::extract_applicant;
use super::rules::{PatternExtractor, GRAMMAR, GRAMMAR_VERSION};
use super::DocumentParser;

/// Result of extracting one document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: ExtractionRecord,
    /// Extraction warnings (missing fields, recognizer failures).
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Parser producing the full field catalog for a planning decision notice.
pub struct PlanningDocumentParser {
    /// Shared, read-only entity recognizer.
    recognizer: Arc<dyn EntityRecognizer>,
    /// Characters of leading text handed to the recognizer.
    entity_prefix_chars: usize,
}

impl PlanningDocumentParser {
    /// Create a parser around an already constructed recognizer.
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            recognizer,
            entity_prefix_chars: 2000,
        }
    }

    /// Create a parser whose recognizer loads lazily from the configuration.
    pub fn from_config(config: &PlandocConfig) -> Self {
        let recognizer = Arc::new(LazyRecognizer::new(config.recognizer.clone()));
        Self::new(recognizer).with_entity_prefix_chars(config.extraction.entity_prefix_chars)
    }

    /// Set the recognition prefix length.
    pub fn with_entity_prefix_chars(mut self, chars: usize) -> Self {
        self.entity_prefix_chars = chars;
        self
    }

    pub fn entity_prefix_chars(&self) -> usize {
        self.entity_prefix_chars
    }

    pub fn recognizer(&self) -> &Arc<dyn EntityRecognizer> {
        &self.recognizer
    }
}

impl DocumentParser for PlanningDocumentParser {
    fn parse(&self, filename: &str, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing {} ({} characters)", filename, text.chars().count());

        let window = EntityWindow::new(text, self.entity_prefix_chars, self.recognizer.as_ref());

        let mut record = ExtractionRecord::absent(filename);
        // Address has an entity fallback and is handled below.
        for rule in GRAMMAR.iter().copied().filter(|rule| rule.field != FieldName::Address) {
            *record.field_mut(rule.field) = PatternExtractor::new(rule).extract_field(text);
        }
        record.address = extract_address(text, &window);
        record.applicant = extract_applicant(&window);

        if let Some(error) = window.error() {
            warnings.push(format!("Entity recognition failed: {}", error));
        }
        for field in record.missing_fields() {
            warnings.push(format!("Could not extract {}", field));
        }

        debug!(
            "Extracted {} of {} fields from {} (grammar v{})",
            FieldName::ALL.len() - record.missing_fields().len(),
            FieldName::ALL.len(),
            filename,
            GRAMMAR_VERSION
        );

        ExtractionResult {
            record,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
