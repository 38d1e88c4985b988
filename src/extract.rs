//! Best-effort count extraction from free-form model responses
//!
//! Responses are natural language ("I can see 5 fingers in the image"),
//! sometimes with markdown or embedded code output. Extraction scans a
//! fixed, ordered pattern table against the lower-cased text and takes the
//! first match; there is no reconciliation between multiple candidate
//! numbers, so ambiguous texts may yield a wrong or no answer. That is the
//! accepted trade-off of scoring free text.

use std::sync::LazyLock;

use regex::Regex;

/// Ordered pattern table, evaluated top-down. Unit-word patterns outrank the
/// generic "count"/"total" forms, which outrank a bare number.
static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(\d+)\s*fingers?",
        r"(\d+)\s*coins?",
        r"(\d+)\s*rebar",
        r"(\d+)\s*pieces?",
        r"(\d+)\s*items?",
        r"count[:\s]+(\d+)",
        r"total[:\s]+(\d+)",
        r"there (?:are|is) (\d+)",
        r"^(\d+)$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("extraction pattern must compile"))
    .collect()
});

/// Extract the count a response text is reporting, if any.
///
/// The first pattern (in table order) that matches anywhere in the
/// lower-cased text wins; its capture parses as the result. No match, or a
/// capture too large for `i64`, yields `None` rather than an error.
pub fn extract_count(text: &str) -> Option<i64> {
    let text = text.to_lowercase();
    for pattern in PATTERNS.iter() {
        if let Some(captures) = pattern.captures(&text) {
            if let Ok(value) = captures[1].parse::<i64>() {
                return Some(value);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_finger_count() {
        assert_eq!(extract_count("I see 5 fingers total"), Some(5));
        assert_eq!(extract_count("The hand shows 1 finger."), Some(1));
    }

    #[test]
    fn test_extracts_unit_words() {
        assert_eq!(extract_count("There appear to be 23 coins here."), Some(23));
        assert_eq!(extract_count("I count 14 rebar segments"), Some(14));
        assert_eq!(extract_count("roughly 6 pieces of hardware"), Some(6));
        assert_eq!(extract_count("exactly 9 items on the table"), Some(9));
    }

    #[test]
    fn test_extracts_count_and_total_forms() {
        assert_eq!(extract_count("Count: 15"), Some(15));
        assert_eq!(extract_count("Total: 7"), Some(7));
        assert_eq!(extract_count("the count 12 was verified"), Some(12));
    }

    #[test]
    fn test_extracts_there_are_form() {
        assert_eq!(extract_count("there are 12"), Some(12));
        assert_eq!(extract_count("There is 1 visible."), Some(1));
    }

    #[test]
    fn test_bare_number_requires_whole_text() {
        assert_eq!(extract_count("42"), Some(42));
        assert_eq!(extract_count("42 "), None);
        assert_eq!(extract_count("about 42"), None);
    }

    #[test]
    fn test_no_numeral_yields_none() {
        assert_eq!(extract_count("I cannot tell"), None);
        assert_eq!(extract_count(""), None);
    }

    #[test]
    fn test_pattern_priority_first_match_wins() {
        // coins pattern precedes the total pattern in the table
        assert_eq!(
            extract_count("I found 3 coins in the image. Total: 9"),
            Some(3)
        );
        // fingers precede coins regardless of position in the text
        assert_eq!(extract_count("2 coins next to 5 fingers"), Some(5));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(extract_count("THERE ARE 12 COINS"), Some(12));
        assert_eq!(extract_count("TOTAL: 7"), Some(7));
    }

    #[test]
    fn test_oversized_number_yields_none() {
        assert_eq!(extract_count("99999999999999999999999 coins"), None);
    }
}
