//! Utilities to compare strings the way a user expects them to be sorted

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare alphabetically, the way a locale-aware collation does
///
/// Letters are compared first, ignoring accents and case. Strings that only differ by their accents are then ordered
/// unaccented first, and strings that only differ by case are ordered lower-case first.
pub fn compare_alpha(left: &str, right: &str) -> Ordering {
    let left_lower = left.to_lowercase();
    let right_lower = right.to_lowercase();

    Ord::cmp(&base_letters(&left_lower), &base_letters(&right_lower))
        .then_with(|| Ord::cmp(&left_lower, &right_lower))
        .then_with(|| Ord::cmp(right, left))
}

/// Strip the accents of `text`
fn base_letters(text: &str) -> String {
    text.nfd()
        .filter(|c| is_combining_mark(*c) == false)
        .collect()
}

/// Whether `haystack` contains `lowercase_needle`, ignoring case.
///
/// `lowercase_needle` is expected to be lower-cased already
pub fn contains_ignore_case(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}
