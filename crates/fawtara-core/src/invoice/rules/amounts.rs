//! Total-amount extraction.
//!
//! Lines carrying a total keyword are preferred and the largest number on
//! them wins, since a grand total outranks subtotals printed on the same line.
//! Without keyword lines the last number in the document is taken, as totals
//! are usually printed last. A subtotal on a keyword line can still win when
//! it is the largest number there.

use std::str::FromStr;

use lazy_static::lazy_static;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use super::digits::normalize_digits;
use super::patterns::AMOUNT_NUMBER;
use super::{is_line_break, ExtractionMatch, FieldExtractor};
use crate::error::{FawtaraError, Result};
use crate::models::config::AmountConfig;

const ARABIC_DECIMAL_SEPARATOR: char = '\u{066B}';

lazy_static! {
    static ref DEFAULT_EXTRACTOR: AmountExtractor =
        AmountExtractor::from_config(&AmountConfig::default()).unwrap();
}

/// Extract the invoice total, or zero when the text holds no number.
pub fn extract_amount(text: &str) -> Decimal {
    DEFAULT_EXTRACTOR.extract_amount(text)
}

/// Amount field extractor.
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    /// Upper-cased total keywords.
    keywords: Vec<String>,
}

impl AmountExtractor {
    pub fn from_config(config: &AmountConfig) -> Result<Self> {
        if config.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(FawtaraError::Config(
                "amount keywords must not be empty".to_string(),
            ));
        }

        Ok(Self {
            keywords: config.keywords.iter().map(|k| k.to_uppercase()).collect(),
        })
    }

    /// Extract the total, defaulting to zero.
    pub fn extract_amount(&self, text: &str) -> Decimal {
        self.extract(text).map(|m| m.value).unwrap_or(Decimal::ZERO)
    }

    fn is_keyword_line(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        self.keywords.iter().any(|k| upper.contains(k.as_str()))
    }

    fn keyword_line_amounts(&self, normalized: &str) -> Vec<ExtractionMatch<Decimal>> {
        normalized
            .split(is_line_break)
            .filter(|line| self.is_keyword_line(line))
            .flat_map(|line| {
                AMOUNT_NUMBER
                    .find_iter(line)
                    .map(move |m| ExtractionMatch::new(parse_amount(m.as_str()), line.trim()))
            })
            .collect()
    }

    fn document_amounts(&self, normalized: &str) -> Vec<ExtractionMatch<Decimal>> {
        AMOUNT_NUMBER
            .find_iter(normalized)
            .map(|m| {
                ExtractionMatch::new(parse_amount(m.as_str()), m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        DEFAULT_EXTRACTOR.clone()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let normalized = normalize_amount_text(text);

        let keyword_amounts = self.keyword_line_amounts(&normalized);
        if !keyword_amounts.is_empty() {
            let best = keyword_amounts
                .into_iter()
                .reduce(|best, m| if m.value > best.value { m } else { best });
            if let Some(ref best) = best {
                debug!("Total {} taken from keyword line {:?}", best.value, best.source);
            }
            return best;
        }

        let last = self.document_amounts(&normalized).pop();
        if let Some(ref last) = last {
            debug!("No keyword line with a number, using last number {}", last.value);
        }
        last
    }

    /// Candidates the total is chosen from: numbers on keyword lines when there
    /// are any, otherwise every number in the document.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let normalized = normalize_amount_text(text);

        let keyword_amounts = self.keyword_line_amounts(&normalized);
        if keyword_amounts.is_empty() {
            self.document_amounts(&normalized)
        } else {
            keyword_amounts
        }
    }
}

/// Normalize digits, drop thousands commas and map the Arabic decimal separator.
fn normalize_amount_text(text: &str) -> String {
    normalize_digits(text)
        .replace(',', "")
        .replace(ARABIC_DECIMAL_SEPARATOR, ".")
}

/// Parse a matched number; values beyond `Decimal`'s range saturate so an
/// oversized number still takes part in the comparison.
fn parse_amount(s: &str) -> Decimal {
    Decimal::from_str(s)
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(Decimal::from_f64))
        .unwrap_or(Decimal::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_keyword_line_max() {
        assert_eq!(extract_amount("Subtotal 100\nTOTAL 250.50"), dec("250.50"));
    }

    #[test]
    fn test_fallback_last_number() {
        assert_eq!(extract_amount("random text 42"), dec("42"));
        assert_eq!(extract_amount("Item 5\nItem 12.5\nThanks"), dec("12.5"));
    }

    #[test]
    fn test_no_numbers() {
        assert_eq!(extract_amount("no numbers"), Decimal::ZERO);
        assert_eq!(extract_amount(""), Decimal::ZERO);
    }

    #[test]
    fn test_keyword_line_beats_larger_numbers_elsewhere() {
        let text = "Invoice No 99999\nAmount due 120.00\nPhone 07701234567";
        assert_eq!(extract_amount(text), dec("120.00"));
    }

    #[test]
    fn test_thousands_commas() {
        assert_eq!(extract_amount("Grand Total: 1,234,567.89"), dec("1234567.89"));
    }

    #[test]
    fn test_arabic_total() {
        let text = "فاتورة كهرباء\nالإجمالي: ١,٢٥٠٫٧٥ دينار";
        assert_eq!(extract_amount(text), dec("1250.75"));
    }

    #[test]
    fn test_decimals_cut_at_two_digits() {
        // "10.999" reads as 10.99 followed by 9
        assert_eq!(extract_amount("TOTAL 10.999"), dec("10.99"));
    }

    #[test]
    fn test_persian_digits_are_not_amounts() {
        assert_eq!(extract_amount("TOTAL ۲۵۰"), Decimal::ZERO);
        assert_eq!(extract_amount("TOTAL ۲۵۰ / 40"), dec("40"));
    }

    #[test]
    fn test_oversized_numbers_saturate() {
        assert_eq!(extract_amount("TOTAL 123456789012345678901234567890"), Decimal::MAX);
        assert_eq!(
            extract_amount("TOTAL 250.50 ref 123456789012345678901234567890"),
            Decimal::MAX
        );
        // Still a keyword-line candidate, so the document scan is not used
        assert_eq!(
            extract_amount("TOTAL 123456789012345678901234567890\nPage 2"),
            Decimal::MAX
        );
        assert_eq!(extract_amount("ref 123456789012345678901234567890"), Decimal::MAX);
    }

    #[test]
    fn test_parse_amount_keeps_in_range_values() {
        assert_eq!(parse_amount("79228162514264337593543950335"), Decimal::MAX);
        assert_eq!(parse_amount("250.50"), dec("250.50"));
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(extract_amount("item 300\ntotal: 15"), dec("15"));
    }

    #[test]
    fn test_carriage_return_splits_lines() {
        assert_eq!(extract_amount("TOTAL 10\rPhone 5550000"), dec("10"));
    }

    #[test]
    fn test_extract_all_candidates() {
        let extractor = AmountExtractor::default();

        let keyword: Vec<Decimal> = extractor
            .extract_all("Subtotal 100\nTax 15\nTOTAL 115")
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(keyword, vec![dec("100"), dec("115")]);

        let fallback = extractor.extract_all("a 1 b 2.5");
        assert_eq!(fallback.len(), 2);
        assert_eq!(fallback[1].position, Some((6, 9)));
    }

    #[test]
    fn test_source_is_keyword_line() {
        let extractor = AmountExtractor::default();
        let best = extractor.extract("  TOTAL 250.50  ").unwrap();
        assert_eq!(best.source, "TOTAL 250.50");
    }

    #[test]
    fn test_custom_keywords() {
        let config = AmountConfig {
            keywords: vec!["net".to_string()],
        };
        let extractor = AmountExtractor::from_config(&config).unwrap();
        assert_eq!(extractor.extract_amount("Net 50\nTotal 70"), dec("50"));
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let config = AmountConfig {
            keywords: vec![" ".to_string()],
        };
        assert!(AmountExtractor::from_config(&config).is_err());
    }
}
