//! Planning application reference extraction.

use super::patterns::REFERENCE_RULE;
use super::{FieldExtractor, PatternExtractor};

/// Extract the first planning reference in the text, e.g. `23/01234/FUL`.
///
/// The letter suffix is case-sensitive: `23/01234/ful` is not a reference.
pub fn extract_reference(text: &str) -> Option<String> {
    PatternExtractor::new(&REFERENCE_RULE)
        .extract(text)
        .map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_in_prose() {
        let text = "Application No: 23/01234/FUL for the erection of a garage.";
        assert_eq!(extract_reference(text), Some("23/01234/FUL".to_string()));
    }

    #[test]
    fn test_five_digit_serial_and_long_suffix() {
        assert_eq!(
            extract_reference("Ref 24/10025/HOUSE"),
            Some("24/10025/HOUSE".to_string())
        );
    }

    #[test]
    fn test_counts_violated() {
        assert_eq!(extract_reference("23/1/FU"), None);
        assert_eq!(extract_reference("2023/01234/FUL"), None);
        assert_eq!(extract_reference("23/012345/FUL"), None);
        assert_eq!(extract_reference("23/01234/F"), None);
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        assert_eq!(extract_reference("23/01234/ful"), None);
    }

    #[test]
    fn test_first_match_wins() {
        let text = "Supersedes 19/00001/OUT. Now 23/01234/REM.";
        let extractor = PatternExtractor::new(&REFERENCE_RULE);
        assert_eq!(extractor.extract(text).unwrap().value, "19/00001/OUT");
        assert_eq!(extractor.extract_all(text).len(), 2);
    }
}
