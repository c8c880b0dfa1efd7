//! Character-pattern validators for PAN values.
//!
//! Small total functions over arbitrary strings. They are used by the
//! classifier on sub-segments of a PAN, and are exported on their own so a
//! single candidate string can be checked ad hoc.

use once_cell::sync::Lazy;
use regex::Regex;

/// Five letters, four digits, one letter.
static PAN_FORMAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap());

/// Check whether any two consecutive characters are equal.
///
/// Strings shorter than two characters have no adjacent pair and return false.
pub fn has_adjacent_repeat(s: &str) -> bool {
    first_adjacent_repeat(s).is_some()
}

/// Position and character of the first adjacent pair, if any.
///
/// The position is the char index of the first character of the pair.
pub fn first_adjacent_repeat(s: &str) -> Option<(usize, char)> {
    s.chars()
        .zip(s.chars().skip(1))
        .enumerate()
        .find(|(_, (a, b))| a == b)
        .map(|(i, (c, _))| (i, c))
}

/// Check whether the whole string is an unbroken ascending run of code points.
///
/// Every character must be exactly one code point above the one before it,
/// e.g. "ABCDE" or "1234". Descending runs are not flagged. Strings of zero or
/// one characters have no pair to break the run and are treated as sequences.
pub fn is_strict_ascending_sequence(s: &str) -> bool {
    s.chars()
        .zip(s.chars().skip(1))
        .all(|(a, b)| (a as u32).checked_add(1) == Some(b as u32))
}

/// Validate the structural PAN layout (letter{5} digit{4} letter{1}).
///
/// Only ASCII uppercase letters and ASCII digits qualify.
pub fn pan_format(value: &str) -> bool {
    PAN_FORMAT.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_repeat_short() {
        assert!(!has_adjacent_repeat(""));
        assert!(!has_adjacent_repeat("A"));
        assert!(has_adjacent_repeat("AA"));
    }

    #[test]
    fn test_adjacent_repeat() {
        assert!(has_adjacent_repeat("AABCD"));
        assert!(has_adjacent_repeat("ABCDD"));
        assert!(has_adjacent_repeat("12334"));
        assert!(has_adjacent_repeat("ab  cd")); // Whitespace counts too
        assert!(!has_adjacent_repeat("ABABA")); // Repeats, but never adjacent
        assert!(!has_adjacent_repeat("AHGVE1276F"));
    }

    #[test]
    fn test_adjacent_repeat_is_case_sensitive() {
        assert!(!has_adjacent_repeat("aA"));
    }

    #[test]
    fn test_first_adjacent_repeat() {
        assert_eq!(first_adjacent_repeat("AHGVE1276F"), None);
        assert_eq!(first_adjacent_repeat("ABCDE1224F"), Some((6, '2')));
        assert_eq!(first_adjacent_repeat("ABCDE5FFGH"), Some((6, 'F')));
        assert_eq!(first_adjacent_repeat("ÄÄ"), Some((0, 'Ä'))); // Char index, not byte
    }

    #[test]
    fn test_sequence_valid() {
        assert!(is_strict_ascending_sequence("ABCDE"));
        assert!(is_strict_ascending_sequence("1234"));
        assert!(is_strict_ascending_sequence("6789"));
        assert!(is_strict_ascending_sequence("VWXYZ"));
    }

    #[test]
    fn test_sequence_invalid() {
        assert!(!is_strict_ascending_sequence("ABCDX")); // Broken at the end
        assert!(!is_strict_ascending_sequence("1243"));
        assert!(!is_strict_ascending_sequence("EDCBA")); // Descending is allowed
        assert!(!is_strict_ascending_sequence("ACEGI")); // Step of two
        assert!(!is_strict_ascending_sequence("AABC")); // Repeat is not a step
        assert!(!is_strict_ascending_sequence("8901")); // No wrap-around
    }

    #[test]
    fn test_sequence_short_segments() {
        assert!(is_strict_ascending_sequence(""));
        assert!(is_strict_ascending_sequence("Q"));
    }

    #[test]
    fn test_sequence_crosses_classes_by_code_point() {
        assert!(is_strict_ascending_sequence("89:;")); // ':' follows '9'
        assert!(!is_strict_ascending_sequence("YZA"));
    }

    #[test]
    fn test_pan_format_valid() {
        assert!(pan_format("AHGVE1276F"));
        assert!(pan_format("ABCDE1234F")); // Layout only, sequences are not checked here
    }

    #[test]
    fn test_pan_format_invalid() {
        assert!(!pan_format("ahgve1276f")); // Lowercase
        assert!(!pan_format("AHGVE1276")); // Too short
        assert!(!pan_format("AHGVE1276FF")); // Too long
        assert!(!pan_format("AHGV51276F")); // Digit in letter block
        assert!(!pan_format("AHGVE12X6F")); // Letter in digit block
        assert!(!pan_format("AHGVE12761")); // Digit in last position
        assert!(!pan_format(" AHGVE1276F")); // Untrimmed
        assert!(!pan_format("AHGVE١٢٧٦F")); // Non-ASCII digits
        assert!(!pan_format(""));
    }
}
