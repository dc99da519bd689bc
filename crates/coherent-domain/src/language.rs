//! Script-based language guess
//!
//! A coarse heuristic used whenever the model-backed detector is skipped or
//! unavailable. It only distinguishes four buckets by Unicode block and
//! reports English for everything else, including languages it cannot tell
//! apart: Persian comes back as `ar`, Spanish and Japanese kana as `en`.
//! The bilingual canned answers downstream only care about the `ar`/`en`
//! split, so this precision limit is accepted as-is.

/// Language code reported when no guess is available
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Guess a language code from the scripts present in `text`
///
/// Checked in order: Arabic (U+0600..=U+06FF) → `ar`, CJK unified
/// ideographs (U+4E00..=U+9FFF) → `zh`, Cyrillic (U+0400..=U+04FF) → `ru`,
/// otherwise `en`. Never fails.
///
/// # Examples
///
/// ```
/// use coherent_domain::detect_fallback;
///
/// assert_eq!(detect_fallback("كيف أحجز طيران"), "ar");
/// assert_eq!(detect_fallback("咖啡会升高血压吗"), "zh");
/// assert_eq!(detect_fallback("привет"), "ru");
/// assert_eq!(detect_fallback("hello"), "en");
/// ```
pub fn detect_fallback(text: &str) -> &'static str {
    if contains_in_range(text, '\u{0600}', '\u{06FF}') {
        return "ar";
    }
    if contains_in_range(text, '\u{4E00}', '\u{9FFF}') {
        return "zh";
    }
    if contains_in_range(text, '\u{0400}', '\u{04FF}') {
        return "ru";
    }
    "en"
}

/// Whether a language code is missing or the unknown sentinel
pub fn is_unresolved(language: &str) -> bool {
    let language = language.trim();
    language.is_empty() || language.eq_ignore_ascii_case(UNKNOWN_LANGUAGE)
}

fn contains_in_range(text: &str, low: char, high: char) -> bool {
    text.chars().any(|c| (low..=high).contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mixed_script_prefers_arabic() {
        assert_eq!(detect_fallback("flight من مصر"), "ar");
        assert_eq!(detect_fallback("Москва 北京"), "zh");
    }

    #[test]
    fn test_unhandled_languages_default_to_english() {
        assert_eq!(detect_fallback("¿Dónde está la estación?"), "en");
        assert_eq!(detect_fallback("こんにちは"), "en");
        assert_eq!(detect_fallback(""), "en");
    }

    #[test]
    fn test_is_unresolved() {
        assert!(is_unresolved(""));
        assert!(is_unresolved("  "));
        assert!(is_unresolved("unknown"));
        assert!(is_unresolved("Unknown"));
        assert!(!is_unresolved("en"));
    }

    proptest! {
        #[test]
        fn prop_arabic_char_yields_ar(
            before in "[ -~]{0,20}",
            c in proptest::char::range('\u{0600}', '\u{06FF}'),
            after in "[ -~]{0,20}",
        ) {
            let text = format!("{}{}{}", before, c, after);
            prop_assert_eq!(detect_fallback(&text), "ar");
        }

        #[test]
        fn prop_ascii_yields_en(text in "[ -~]{0,64}") {
            prop_assert_eq!(detect_fallback(&text), "en");
        }
    }
}
