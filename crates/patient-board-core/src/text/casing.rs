//! Sentence casing for free-text fields.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// First letter of the text, or first letter after a period, each allowing
/// whitespace in between.
static SENTENCE_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^\s*\p{L})|(\.\s*\p{L})").expect("valid sentence start regex"));

/// Uppercase the first letter of `text` and the first letter after every `.`.
///
/// Letter detection is Unicode-aware. A leading non-letter such as `¿` blocks
/// the start-of-text rule: `"¿ñandú. él"` becomes `"¿ñandú. Él"`.
pub fn normalize_text_casing(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    SENTENCE_START_RE
        .replace_all(text, |caps: &Captures<'_>| caps[0].to_uppercase())
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_sentences() {
        assert_eq!(normalize_text_casing("hola. como estas"), "Hola. Como estas");
        assert_eq!(normalize_text_casing(""), "");
    }

    #[test]
    fn test_leading_whitespace() {
        assert_eq!(normalize_text_casing("  hola"), "  Hola");
    }

    #[test]
    fn test_non_ascii_letters() {
        assert_eq!(normalize_text_casing("ñandú. él vino"), "Ñandú. Él vino");
    }

    #[test]
    fn test_no_letters_untouched() {
        assert_eq!(normalize_text_casing("2024-01-15"), "2024-01-15");
        assert_eq!(normalize_text_casing("..."), "...");
    }

    #[test]
    fn test_only_first_letter_after_period() {
        assert_eq!(normalize_text_casing("dr. lópez revisa"), "Dr. López revisa");
        assert_eq!(normalize_text_casing("a.b.c"), "A.B.C");
    }
}
