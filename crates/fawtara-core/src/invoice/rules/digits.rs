//! Eastern Arabic-Indic digit normalization.

use std::borrow::Cow;

const ARABIC_INDIC_ZERO: u32 = 0x0660;

/// Replace every Eastern Arabic-Indic digit (٠-٩) with its ASCII counterpart.
///
/// All other characters pass through unchanged, so the output has the same
/// number of characters as the input. Text without such digits is returned
/// borrowed.
pub fn normalize_digits(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_arabic_indic_digit) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().map(to_ascii_digit).collect())
}

fn is_arabic_indic_digit(c: char) -> bool {
    matches!(c, '\u{0660}'..='\u{0669}')
}

fn to_ascii_digit(c: char) -> char {
    if is_arabic_indic_digit(c) {
        char::from_digit(c as u32 - ARABIC_INDIC_ZERO, 10).unwrap_or(c)
    } else {
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_digits() {
        assert_eq!(normalize_digits("٠١٢٣٤٥٦٧٨٩"), "0123456789");
    }

    #[test]
    fn test_mixed_text() {
        assert_eq!(
            normalize_digits("المبلغ: ١٢٫٥٠ دينار بتاريخ ٢٠٢٤/٠٣/١٥"),
            "المبلغ: 12٫50 دينار بتاريخ 2024/03/15"
        );
    }

    #[test]
    fn test_ascii_is_borrowed_and_unchanged() {
        let text = "Invoice 2024-03-15 total 99.90";
        let normalized = normalize_digits(text);
        assert!(matches!(normalized, Cow::Borrowed(_)));
        assert_eq!(normalized, text);
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize_digits(""), "");
    }

    #[test]
    fn test_length_preserved_and_idempotent() {
        let inputs = ["فاتورة ٣٤٥", "abc", "٩x٨y٧", "Extended ۱۲ digits stay"];
        for input in inputs {
            let once = normalize_digits(input);
            assert_eq!(once.chars().count(), input.chars().count());
            assert_eq!(normalize_digits(&once), once);
        }
        // Extended (Persian) digits are not Eastern Arabic-Indic
        assert_eq!(normalize_digits("۱۲"), "۱۲");
    }
}
