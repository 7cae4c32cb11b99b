//! Site address extraction.
//!
//! The labeled `At:` block is authoritative. Only when it is missing does
//! the extractor fall back to the first place-like entity in the document's
//! leading text.

use tracing::debug;

use crate::models::record::{ExtractedField, ExtractionMethod};
use crate::ner::{EntityLabel, EntityWindow};

use super::rules::patterns::SITE_ADDRESS_RULE;

/// Extract the site address, labeled block first, entity fallback second.
///
/// The method on the returned field names the tier that produced the value.
pub fn extract_address(text: &str, window: &EntityWindow<'_>) -> ExtractedField {
    if let Some(labeled) = SITE_ADDRESS_RULE.apply(text) {
        debug!("Address from labeled block: {}", labeled.value);
        return labeled.into_field();
    }

    match window.first(EntityLabel::is_place) {
        Some(entity) => {
            debug!("Address from {} entity: {}", entity.label, entity.text);
            ExtractedField::matched(entity.text.clone(), ExtractionMethod::EntityRecognition)
        }
        None => ExtractedField::absent(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecognitionError;
    use crate::ner::{Entity, EntityRecognizer, GazetteerRecognizer};
    use pretty_assertions::assert_eq;

    struct Fixed(Vec<Entity>);

    impl EntityRecognizer for Fixed {
        fn recognize(&self, _text: &str) -> Result<Vec<Entity>, RecognitionError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_labeled_block_wins() {
        let recognizer = GazetteerRecognizer::new();
        let text = "Decision notice\nAt:\n42 High Street, Springfield\nDate: 1 May 2024";
        let window = EntityWindow::new(text, 2000, &recognizer);

        let field = extract_address(text, &window);
        assert_eq!(field.value(), Some("42 High Street, Springfield"));
        assert_eq!(field.method, ExtractionMethod::Regex);
        assert_eq!(field.confidence, 1.0);
    }

    #[test]
    fn test_label_must_start_a_line() {
        let recognizer = Fixed(Vec::new());
        let text = "Look At:\n42 High Street";
        let window = EntityWindow::new(text, 2000, &recognizer);
        assert!(!extract_address(text, &window).is_present());
    }

    #[test]
    fn test_blank_line_after_label_keeps_labeled_block() {
        let recognizer = GazetteerRecognizer::new();
        let text = "At:\n\n42 High Street, Harrogate\nGRANTED";
        let window = EntityWindow::new(text, 2000, &recognizer);

        let field = extract_address(text, &window);
        assert_eq!(field.value(), Some("42 High Street, Harrogate"));
        assert_eq!(field.method, ExtractionMethod::Regex);
        assert_eq!(field.confidence, 1.0);
    }

    #[test]
    fn test_label_without_address_falls_back() {
        let recognizer = GazetteerRecognizer::new();
        let text = "Site in Harrogate\nAt:\n\n";
        let window = EntityWindow::new(text, 2000, &recognizer);

        let field = extract_address(text, &window);
        assert_eq!(field.value(), Some("Harrogate"));
        assert_eq!(field.method, ExtractionMethod::EntityRecognition);
    }

    #[test]
    fn test_entity_fallback() {
        let recognizer = GazetteerRecognizer::new().with_places(vec!["Springfield".to_string()]);
        let text = "Proposed garage at land north of Springfield";
        let window = EntityWindow::new(text, 2000, &recognizer);

        let field = extract_address(text, &window);
        assert_eq!(field.value(), Some("Springfield"));
        assert_eq!(field.confidence, 0.6);
    }

    #[test]
    fn test_person_entities_are_not_addresses() {
        let recognizer = Fixed(vec![
            Entity::new("Ann Price", EntityLabel::Person, 0, 9),
            Entity::new("Acme Ltd", EntityLabel::Organization, 10, 18),
        ]);
        let text = "Ann Price Acme Ltd";
        let window = EntityWindow::new(text, 2000, &recognizer);

        let field = extract_address(text, &window);
        assert_eq!(field, ExtractedField::absent());
    }

    #[test]
    fn test_place_outside_prefix_is_ignored() {
        let recognizer = GazetteerRecognizer::new();
        let text = format!("{}Harrogate", "x ".repeat(20));
        let window = EntityWindow::new(&text, 10, &recognizer);
        assert!(!extract_address(&text, &window).is_present());
    }
}
