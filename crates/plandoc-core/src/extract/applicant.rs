//! Applicant extraction.

use crate::models::record::{ExtractedField, ExtractionMethod};
use crate::ner::{EntityLabel, EntityWindow};

/// First person entity in the document's leading text.
///
/// Agents, officers and applicants are not told apart; the earliest person
/// mention is taken as the applicant.
pub fn extract_applicant(window: &EntityWindow<'_>) -> ExtractedField {
    window
        .first(EntityLabel::is_person)
        .map(|entity| {
            ExtractedField::matched(entity.text.clone(), ExtractionMethod::EntityRecognition)
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::GazetteerRecognizer;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_person_wins() {
        let recognizer = GazetteerRecognizer::new();
        let text = "Applicant: Mrs Jane Smith\nAgent: Mr Tom Hughes";
        let window = EntityWindow::new(text, 2000, &recognizer);

        let field = extract_applicant(&window);
        assert_eq!(field.value(), Some("Jane Smith"));
        assert_eq!(field.method, ExtractionMethod::EntityRecognition);
        assert_eq!(field.confidence, 0.6);
    }

    #[test]
    fn test_no_person() {
        let recognizer = GazetteerRecognizer::new();
        let window = EntityWindow::new("Garage extension, Leeds", 2000, &recognizer);
        assert_eq!(extract_applicant(&window), ExtractedField::absent());
    }
}
