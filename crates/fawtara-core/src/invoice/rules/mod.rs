//! Rule-based field extractors for bilingual invoices.

pub mod amounts;
pub mod category;
pub mod currency;
pub mod dates;
pub mod digits;
pub mod language;
pub mod patterns;

pub use amounts::{extract_amount, AmountExtractor};
pub use category::{classify_category, CategoryClassifier};
pub use currency::{detect_currency, CurrencyDetector};
pub use dates::{extract_date, DateExtractor};
pub use digits::normalize_digits;
pub use language::{detect_language, script_language};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the winning value from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract every candidate, in the order the extractor ranks them.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An extracted value together with the text that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Source text that was matched (a substring, keyword or line).
    pub source: String,
    /// Byte span of the match in the digit-normalized text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            source: source.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Line boundaries recognized when splitting OCR text into lines.
pub(crate) fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}
