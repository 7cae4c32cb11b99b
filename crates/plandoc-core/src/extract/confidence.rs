//! Provenance-based confidence scoring.
//!
//! Confidence says how a value was found, not how likely it is to be right.
//! It depends only on whether a value is present and which method produced
//! it; text quality, entity scores and pattern specificity never enter.

use crate::models::record::ExtractionMethod;

/// Confidence of a value found by a deterministic pattern.
pub const PATTERN_CONFIDENCE: f32 = 1.0;

/// Confidence of a value found by the entity-recognition fallback.
pub const ENTITY_CONFIDENCE: f32 = 0.6;

/// Confidence of an absent value.
pub const ABSENT_CONFIDENCE: f32 = 0.0;

/// Score a field from its presence and extraction method.
pub fn score(present: bool, method: ExtractionMethod) -> f32 {
    if !present {
        return ABSENT_CONFIDENCE;
    }
    match method {
        ExtractionMethod::Regex => PATTERN_CONFIDENCE,
        ExtractionMethod::EntityRecognition => ENTITY_CONFIDENCE,
        ExtractionMethod::None => ABSENT_CONFIDENCE,
    }
}
