//! Decision date extraction.
//!
//! Dates are matched syntactically and returned as written. There is no
//! calendar validation, so `99 Blorp 2024` is a date as far as this module
//! is concerned.

use super::patterns::DATE_RULE;
use super::{FieldExtractor, PatternExtractor};

/// Extract the first long-form date in the text.
pub fn extract_date(text: &str) -> Option<String> {
    PatternExtractor::new(&DATE_RULE).extract(text).map(|m| m.value)
}
