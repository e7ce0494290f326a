//! Script language detection.

use super::patterns::ARABIC_LETTER;
use crate::models::invoice::Language;

/// Arabic if the text has at least one Arabic letter, English otherwise.
pub fn script_language(text: &str) -> Language {
    if ARABIC_LETTER.is_match(text) {
        Language::Ar
    } else {
        Language::En
    }
}

/// Detect the script language code ("ar" or "en").
pub fn detect_language(text: &str) -> &'static str {
    script_language(text).code()
}
