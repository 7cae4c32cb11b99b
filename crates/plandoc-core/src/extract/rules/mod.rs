//! Rule-based field extractors for planning decision notices.

pub mod dates;
pub mod decision;
pub mod patterns;
pub mod reference;

pub use dates::extract_date;
pub use decision::extract_decision;
pub use patterns::{GrammarRule, Normalize, GRAMMAR, GRAMMAR_VERSION};
pub use reference::extract_reference;

use crate::models::record::{ExtractedField, ExtractionMethod};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Strategy that found it.
    pub method: ExtractionMethod,
    /// Byte range in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, method: ExtractionMethod, source: impl Into<String>) -> Self {
        Self {
            value,
            method,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

impl ExtractionMatch<String> {
    /// Convert into a record field; confidence follows from the method.
    pub fn into_field(self) -> ExtractedField {
        ExtractedField::matched(self.value, self.method)
    }
}

/// Extractor driven by a single grammar rule.
#[derive(Debug, Clone, Copy)]
pub struct PatternExtractor {
    rule: &'static GrammarRule,
}

impl PatternExtractor {
    pub fn new(rule: &'static GrammarRule) -> Self {
        Self { rule }
    }

    /// Extract the first match as a record field.
    pub fn extract_field(&self, text: &str) -> ExtractedField {
        self.extract(text)
            .map(ExtractionMatch::into_field)
            .unwrap_or_default()
    }
}

impl FieldExtractor for PatternExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.rule.apply(text)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.rule.apply_all(text)
    }
}
