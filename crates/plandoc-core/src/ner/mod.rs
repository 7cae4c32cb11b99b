//! Named-entity recognition used by the address fallback and applicant
//! extractors.
//!
//! The recognizer is loaded once and shared read-only between documents; it
//! is injected into the parser so tests can swap in a fixed entity list.

#[cfg(any(feature = "onnx", test))]
mod bio;
mod gazetteer;
mod lazy;
#[cfg(feature = "onnx")]
mod onnx;
mod window;

pub use gazetteer::GazetteerRecognizer;
pub use lazy::LazyRecognizer;
#[cfg(feature = "onnx")]
pub use onnx::OnnxRecognizer;
pub use window::{char_prefix, EntityWindow};

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::RecognitionError;
use crate::models::config::{RecognizerBackend, RecognizerConfig};

/// Semantic category of an entity span.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    /// Countries, cities, counties (OntoNotes `GPE`).
    GeoPoliticalEntity,
    /// Non-political locations (`LOC`).
    Location,
    /// Buildings, roads, named structures (`FAC`).
    Facility,
    Organization,
    Other(String),
}

impl EntityLabel {
    /// Parse an OntoNotes or CoNLL tag, without any `B-`/`I-` prefix.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "PER" | "PERSON" => EntityLabel::Person,
            "GPE" => EntityLabel::GeoPoliticalEntity,
            "LOC" | "LOCATION" => EntityLabel::Location,
            "FAC" | "FACILITY" => EntityLabel::Facility,
            "ORG" | "ORGANIZATION" | "ORGANISATION" => EntityLabel::Organization,
            other => EntityLabel::Other(other.to_string()),
        }
    }

    /// Labels accepted as a site address.
    pub fn is_place(&self) -> bool {
        matches!(
            self,
            EntityLabel::GeoPoliticalEntity | EntityLabel::Location | EntityLabel::Facility
        )
    }

    pub fn is_person(&self) -> bool {
        matches!(self, EntityLabel::Person)
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityLabel::Person => f.write_str("PERSON"),
            EntityLabel::GeoPoliticalEntity => f.write_str("GPE"),
            EntityLabel::Location => f.write_str("LOC"),
            EntityLabel::Facility => f.write_str("FAC"),
            EntityLabel::Organization => f.write_str("ORG"),
            EntityLabel::Other(tag) => f.write_str(tag),
        }
    }
}

/// A recognized entity span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Surface text of the span.
    pub text: String,
    pub label: EntityLabel,
    /// Byte offset of the span start in the recognized text.
    pub start: usize,
    /// Byte offset one past the span end.
    pub end: usize,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label,
            start,
            end,
        }
    }
}

/// Trait for entity recognizers.
///
/// Implementations are shared between batch workers and must not mutate
/// observable state while recognizing.
pub trait EntityRecognizer: Send + Sync {
    /// Recognize entities in the text. Order of the returned spans is not
    /// significant; callers sort by offset.
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, RecognitionError>;

    /// Short backend name for logs.
    fn name(&self) -> &str;
}

impl<R: EntityRecognizer + ?Sized> EntityRecognizer for Arc<R> {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, RecognitionError> {
        (**self).recognize(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Build the recognizer selected by the configuration.
pub fn build_recognizer(
    config: &RecognizerConfig,
) -> Result<Arc<dyn EntityRecognizer>, RecognitionError> {
    match config.backend {
        RecognizerBackend::Gazetteer => Ok(Arc::new(
            GazetteerRecognizer::new().with_places(config.extra_places.iter().cloned()),
        )),
        #[cfg(feature = "onnx")]
        RecognizerBackend::Onnx => Ok(Arc::new(OnnxRecognizer::load(config)?)),
        #[cfg(not(feature = "onnx"))]
        RecognizerBackend::Onnx => Err(RecognitionError::BackendUnavailable("onnx".to_string())),
    }
}

/// Keep the earliest span at each position, preferring the longer one, and
/// drop spans overlapping an already kept span.
pub(crate) fn resolve_overlaps(mut entities: Vec<Entity>) -> Vec<Entity> {
    entities.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut kept: Vec<Entity> = Vec::with_capacity(entities.len());
    for entity in entities {
        if kept.last().is_none_or(|last| entity.start >= last.end) {
            kept.push(entity);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_label_from_tag() {
        assert_eq!(EntityLabel::from_tag("PERSON"), EntityLabel::Person);
        assert_eq!(EntityLabel::from_tag("per"), EntityLabel::Person);
        assert_eq!(EntityLabel::from_tag("GPE"), EntityLabel::GeoPoliticalEntity);
        assert_eq!(EntityLabel::from_tag("LOC"), EntityLabel::Location);
        assert_eq!(EntityLabel::from_tag("FAC"), EntityLabel::Facility);
        assert_eq!(EntityLabel::from_tag("MISC"), EntityLabel::Other("MISC".to_string()));
    }

    #[test]
    fn test_place_labels() {
        assert!(EntityLabel::GeoPoliticalEntity.is_place());
        assert!(EntityLabel::Location.is_place());
        assert!(EntityLabel::Facility.is_place());
        assert!(!EntityLabel::Organization.is_place());
        assert!(!EntityLabel::Person.is_place());
    }

    #[test]
    fn test_resolve_overlaps() {
        let entities = vec![
            Entity::new("Yorkshire", EntityLabel::GeoPoliticalEntity, 5, 14),
            Entity::new("West Yorkshire", EntityLabel::GeoPoliticalEntity, 0, 14),
            Entity::new("Leeds", EntityLabel::GeoPoliticalEntity, 20, 25),
        ];
        let resolved = resolve_overlaps(entities);
        let texts: Vec<&str> = resolved.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["West Yorkshire", "Leeds"]);
    }

    #[test]
    fn test_build_default_recognizer() {
        let recognizer = build_recognizer(&RecognizerConfig::default()).unwrap();
        assert_eq!(recognizer.name(), "gazetteer");
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn test_onnx_backend_unavailable() {
        let config = RecognizerConfig {
            backend: RecognizerBackend::Onnx,
            ..Default::default()
        };
        assert!(matches!(
            build_recognizer(&config),
            Err(RecognitionError::BackendUnavailable(_))
        ));
    }
}
