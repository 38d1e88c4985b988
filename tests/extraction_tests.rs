//! Integration tests for count extraction over realistic response texts.

use agentic_vision::extract_count;

#[test]
fn test_extracts_from_verbose_response() {
    let text = "Looking carefully at the image, I can see a hand with some fingers \
                raised. After counting each one, I see 5 fingers total in the image.";
    assert_eq!(extract_count(text), Some(5));
}

#[test]
fn test_extracts_from_markdown_response() {
    let text = "## Analysis\n\nThe image shows coins on a table.\n\n**Count: 15**\n";
    assert_eq!(extract_count(text), Some(15));
}

#[test]
fn test_extracts_from_code_output_response() {
    let text = "I'll count the items systematically.\n\n```\ndetected = 23\n```\n\nThere are 23 coins in the image.";
    assert_eq!(extract_count(text), Some(23));
}

#[test]
fn test_no_numeral_returns_absent() {
    assert_eq!(extract_count("I cannot tell"), None);
    assert_eq!(
        extract_count("The image is too blurry to count anything."),
        None
    );
}

#[test]
fn test_there_are_and_total_forms() {
    assert_eq!(extract_count("there are 12"), Some(12));
    assert_eq!(extract_count("Total: 7"), Some(7));
}

#[test]
fn test_priority_unit_word_beats_total() {
    // the coins pattern precedes the total pattern, regardless of position
    assert_eq!(extract_count("Total: 9. I counted 3 coins."), Some(3));
}

#[test]
fn test_whole_text_number() {
    assert_eq!(extract_count("42"), Some(42));
    assert_eq!(extract_count("The answer is 42."), None);
}

#[test]
fn test_ambiguous_text_takes_first_table_match_not_best() {
    // a known limitation of the heuristic: the finger pattern wins even when
    // the text corrects itself later
    let text = "At first glance there seem to be 4 fingers, but the total is 5.";
    assert_eq!(extract_count(text), Some(4));
}
