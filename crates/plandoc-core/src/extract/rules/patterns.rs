//! Regex grammar for planning decision fields.
//!
//! Every pattern-based field is described by one [`GrammarRule`]. Adding a
//! field to the catalog means adding a rule here and a column to the record;
//! the extractors themselves do not change.

use lazy_static::lazy_static;
use regex::Regex;

use crate::extract::confidence;
use crate::models::record::{ExtractionMethod, FieldName};

use super::ExtractionMatch;

/// Version of the grammar below. Bump when a pattern changes meaning.
pub const GRAMMAR_VERSION: &str = "2";

/// Post-processing applied to a matched substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalize {
    /// Keep the literal match.
    Verbatim,
    /// Strip surrounding whitespace.
    Trim,
    /// Strip surrounding whitespace and uppercase.
    TrimUppercase,
}

impl Normalize {
    pub fn apply(&self, raw: &str) -> String {
        match self {
            Normalize::Verbatim => raw.to_string(),
            Normalize::Trim => raw.trim().to_string(),
            Normalize::TrimUppercase => raw.trim().to_uppercase(),
        }
    }
}

/// One entry of the grammar: pattern, target field, capture group and
/// normalization.
#[derive(Debug)]
pub struct GrammarRule {
    /// Field this rule fills.
    pub field: FieldName,
    /// Stable rule name, used in logs.
    pub name: &'static str,
    /// Compiled pattern.
    pub pattern: Regex,
    /// Capture group holding the value (0 = whole match).
    pub group: usize,
    /// Normalization applied to the captured text.
    pub normalize: Normalize,
}

impl GrammarRule {
    fn new(
        field: FieldName,
        name: &'static str,
        pattern: &str,
        group: usize,
        normalize: Normalize,
    ) -> Self {
        Self {
            field,
            name,
            pattern: Regex::new(pattern).unwrap(),
            group,
            normalize,
        }
    }

    /// Method recorded for values produced by this rule.
    pub fn method(&self) -> ExtractionMethod {
        ExtractionMethod::Regex
    }

    /// Confidence assigned when this rule matches.
    pub fn confidence_on_match(&self) -> f32 {
        confidence::score(true, self.method())
    }

    /// First match by starting offset whose normalized value is non-empty.
    pub fn apply(&self, text: &str) -> Option<ExtractionMatch<String>> {
        self.matches(text).next()
    }

    /// All non-empty matches in text order.
    pub fn apply_all(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        self.matches(text).collect()
    }

    fn matches<'t>(&'t self, text: &'t str) -> impl Iterator<Item = ExtractionMatch<String>> + 't {
        self.pattern.captures_iter(text).filter_map(move |caps| {
            let m = caps.get(self.group)?;
            let value = self.normalize.apply(m.as_str());
            if value.is_empty() {
                return None;
            }
            Some(
                ExtractionMatch::new(value, self.method(), m.as_str())
                    .with_position(m.start(), m.end()),
            )
        })
    }
}

lazy_static! {
    /// Planning application reference: `23/01234/FUL`.
    pub static ref REFERENCE_RULE: GrammarRule = GrammarRule::new(
        FieldName::Reference,
        "planning-reference",
        r"\b\d{2}/\d{4,5}/[A-Z]{2,}\b",
        0,
        Normalize::Verbatim,
    );

    /// Loose long-form date: `14 March 2024`. The month token is not validated.
    pub static ref DATE_RULE: GrammarRule = GrammarRule::new(
        FieldName::Date,
        "long-date",
        r"\b\d{1,2}\s+\w+\s+\d{4}\b",
        0,
        Normalize::Verbatim,
    );

    /// Decision outcome keywords, including the split decision wording.
    pub static ref DECISION_RULE: GrammarRule = GrammarRule::new(
        FieldName::Decision,
        "decision-outcome",
        r"(?i)(APPROVED|REFUSED|GRANTED|DISMISSED|ALLOWED|PART REFUSAL[,\s]+PART APPROVAL)",
        0,
        Normalize::TrimUppercase,
    );

    /// Site address on the first non-blank line after an `At:` label.
    pub static ref SITE_ADDRESS_RULE: GrammarRule = GrammarRule::new(
        FieldName::Address,
        "site-address-label",
        r"(?m)^[ \t]*At:\s*?\n\s*([^\r\n]*\S)",
        1,
        Normalize::Trim,
    );

    /// The complete grammar, in field catalog order.
    pub static ref GRAMMAR: Vec<&'static GrammarRule> = vec![
        &*REFERENCE_RULE,
        &*DATE_RULE,
        &*SITE_ADDRESS_RULE,
        &*DECISION_RULE,
    ];
}
