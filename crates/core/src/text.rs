//! Text normalization and the typographic cues shared by the filter,
//! classifier and OCR fallback.

use unicode_normalization::UnicodeNormalization;

const ZERO_WIDTH: [char; 4] = ['\u{200b}', '\u{200c}', '\u{200d}', '\u{feff}'];

/// NFKC-normalize, strip zero-width characters and trim.
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfkc().filter(|c| !ZERO_WIDTH.contains(c)).collect();
    composed.trim().to_string()
}

/// Round a font size to one decimal.
pub fn round_size(size: f32) -> f32 {
    (size * 10.0).round() / 10.0
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// At least one cased character and no lowercase ones.
pub fn is_uppercase(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Fully uppercase, or starts uppercase with a majority of capitals.
pub fn is_caps_like(text: &str) -> bool {
    if is_uppercase(text) {
        return true;
    }
    let Some(first) = text.chars().next() else {
        return false;
    };
    if !first.is_uppercase() {
        return false;
    }
    let len = text.chars().count();
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper > len / 2
}

/// Every cased run starts with a capital and continues in lowercase.
pub fn is_title_case(text: &str) -> bool {
    let mut has_cased = false;
    let mut previous_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            has_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            has_cased = true;
        } else {
            previous_cased = false;
        }
    }
    has_cased
}

/// Count of `.`, `;`, `,`, `!` and `?`.
pub fn punctuation_count(text: &str) -> usize {
    text.chars()
        .filter(|c| matches!(c, '.' | ';' | ',' | '!' | '?'))
        .count()
}

/// Count of decimal digits.
pub fn digit_count(text: &str) -> usize {
    text.chars().filter(char::is_ascii_digit).count()
}
