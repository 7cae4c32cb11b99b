//! Decision outcome extraction.

use super::patterns::DECISION_RULE;
use super::{FieldExtractor, PatternExtractor};

/// Extract the first decision outcome keyword, normalized to uppercase.
pub fn extract_decision(text: &str) -> Option<String> {
    PatternExtractor::new(&DECISION_RULE)
        .extract(text)
        .map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_normalization() {
        for text in ["granted", "Granted", "GRANTED", "planning permission is gRaNtEd"] {
            assert_eq!(extract_decision(text), Some("GRANTED".to_string()), "{text}");
        }
    }

    #[test]
    fn test_each_keyword() {
        for keyword in ["APPROVED", "REFUSED", "GRANTED", "DISMISSED", "ALLOWED"] {
            let text = format!("The appeal is {}.", keyword.to_lowercase());
            assert_eq!(extract_decision(&text), Some(keyword.to_string()));
        }
    }

    #[test]
    fn test_split_decision() {
        assert_eq!(
            extract_decision("Decision: Part Refusal, Part Approval"),
            Some("PART REFUSAL, PART APPROVAL".to_string())
        );
        assert_eq!(
            extract_decision("PART REFUSAL\nPART APPROVAL"),
            Some("PART REFUSAL\nPART APPROVAL".to_string())
        );
    }

    #[test]
    fn test_earliest_keyword_wins() {
        let text = "Previously REFUSED under 20/00001/FUL. This application is APPROVED.";
        assert_eq!(extract_decision(text), Some("REFUSED".to_string()));
    }

    #[test]
    fn test_no_keyword() {
        assert_eq!(extract_decision("Application withdrawn"), None);
    }
}
