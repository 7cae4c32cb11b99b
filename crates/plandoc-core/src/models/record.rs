//! Extraction record model and its flat output schema.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fields extracted from every planning decision document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Reference,
    Date,
    Address,
    Decision,
    Applicant,
}

impl FieldName {
    /// The field catalog, in output column order.
    pub const ALL: [FieldName; 5] = [
        FieldName::Reference,
        FieldName::Date,
        FieldName::Address,
        FieldName::Decision,
        FieldName::Applicant,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Reference => "reference",
            FieldName::Date => "date",
            FieldName::Address => "address",
            FieldName::Decision => "decision",
            FieldName::Applicant => "applicant",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Strategy that produced a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractionMethod {
    /// Deterministic regular-expression match.
    Regex,
    /// Named-entity recognition fallback.
    EntityRecognition,
    /// Nothing matched.
    None,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Regex => "regex",
            ExtractionMethod::EntityRecognition => "entity-recognition",
            ExtractionMethod::None => "none",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extracted field with its provenance.
///
/// Construct through [`ExtractedField::matched`] or [`ExtractedField::absent`]
/// so that confidence always follows from the method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedField {
    /// Extracted value, `None` when nothing matched.
    pub value: Option<String>,
    /// Provenance-based confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Strategy that produced the value.
    pub method: ExtractionMethod,
}

impl ExtractedField {
    /// A field produced by `method`. Blank values are treated as absent.
    pub fn matched(value: impl Into<String>, method: ExtractionMethod) -> Self {
        let value = value.into();
        if value.trim().is_empty() || method == ExtractionMethod::None {
            return Self::absent();
        }
        Self {
            value: Some(value),
            confidence: crate::extract::confidence::score(true, method),
            method,
        }
    }

    /// A field for which no strategy found a value.
    pub fn absent() -> Self {
        Self {
            value: None,
            confidence: 0.0,
            method: ExtractionMethod::None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl Default for ExtractedField {
    fn default() -> Self {
        Self::absent()
    }
}

/// Structured data extracted from one source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Source document identifier (file name).
    pub filename: String,
    pub reference: ExtractedField,
    pub date: ExtractedField,
    pub address: ExtractedField,
    pub decision: ExtractedField,
    pub applicant: ExtractedField,
}

impl ExtractionRecord {
    /// A record with every field absent.
    pub fn absent(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            reference: ExtractedField::absent(),
            date: ExtractedField::absent(),
            address: ExtractedField::absent(),
            decision: ExtractedField::absent(),
            applicant: ExtractedField::absent(),
        }
    }

    /// Look up a field by name.
    pub fn field(&self, name: FieldName) -> &ExtractedField {
        match name {
            FieldName::Reference => &self.reference,
            FieldName::Date => &self.date,
            FieldName::Address => &self.address,
            FieldName::Decision => &self.decision,
            FieldName::Applicant => &self.applicant,
        }
    }

    pub fn field_mut(&mut self, name: FieldName) -> &mut ExtractedField {
        match name {
            FieldName::Reference => &mut self.reference,
            FieldName::Date => &mut self.date,
            FieldName::Address => &mut self.address,
            FieldName::Decision => &mut self.decision,
            FieldName::Applicant => &mut self.applicant,
        }
    }

    /// All fields in catalog order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldName, &ExtractedField)> {
        FieldName::ALL.into_iter().map(move |name| (name, self.field(name)))
    }

    /// Names of the fields that were not found.
    pub fn missing_fields(&self) -> Vec<FieldName> {
        self.fields()
            .filter(|(_, f)| !f.is_present())
            .map(|(name, _)| name)
            .collect()
    }

    /// Flatten into the output schema.
    pub fn to_row(&self) -> RecordRow {
        RecordRow {
            filename: self.filename.clone(),
            reference: self.reference.value.clone(),
            reference_confidence: self.reference.confidence,
            date: self.date.value.clone(),
            date_confidence: self.date.confidence,
            address: self.address.value.clone(),
            address_confidence: self.address.confidence,
            decision: self.decision.value.clone(),
            decision_confidence: self.decision.confidence,
            applicant: self.applicant.value.clone(),
            applicant_confidence: self.applicant.confidence,
        }
    }
}

/// Flat output row written to JSON and CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub filename: String,
    pub reference: Option<String>,
    pub reference_confidence: f32,
    pub date: Option<String>,
    pub date_confidence: f32,
    pub address: Option<String>,
    pub address_confidence: f32,
    pub decision: Option<String>,
    pub decision_confidence: f32,
    pub applicant: Option<String>,
    pub applicant_confidence: f32,
}

impl RecordRow {
    /// Column names, in serialization order.
    pub const COLUMNS: [&'static str; 11] = [
        "filename",
        "reference",
        "reference_confidence",
        "date",
        "date_confidence",
        "address",
        "address_confidence",
        "decision",
        "decision_confidence",
        "applicant",
        "applicant_confidence",
    ];
}

impl From<&ExtractionRecord> for RecordRow {
    fn from(record: &ExtractionRecord) -> Self {
        record.to_row()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_absent_record_has_all_fields() {
        let record = ExtractionRecord::absent("a.txt");
        assert_eq!(record.fields().count(), 5);
        assert_eq!(record.missing_fields(), FieldName::ALL.to_vec());
        assert!(record.fields().all(|(_, f)| f.confidence == 0.0));
    }

    #[test]
    fn test_matched_confidence_follows_method() {
        let regex = ExtractedField::matched("23/01234/FUL", ExtractionMethod::Regex);
        assert_eq!(regex.confidence, 1.0);

        let entity = ExtractedField::matched("Leeds", ExtractionMethod::EntityRecognition);
        assert_eq!(entity.confidence, 0.6);
    }

    #[test]
    fn test_blank_value_is_absent() {
        let field = ExtractedField::matched("   ", ExtractionMethod::Regex);
        assert_eq!(field, ExtractedField::absent());
    }

    #[test]
    fn test_row_columns_match_serialized_keys() {
        let row = ExtractionRecord::absent("doc.txt").to_row();
        let json = serde_json::to_value(&row).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

        let mut expected = RecordRow::COLUMNS.to_vec();
        expected.sort();
        let mut keys = keys;
        keys.sort();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_method_serializes_kebab_case() {
        let json = serde_json::to_string(&ExtractionMethod::EntityRecognition).unwrap();
        assert_eq!(json, "\"entity-recognition\"");
    }
}
