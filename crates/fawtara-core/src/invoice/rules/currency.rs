//! Currency detection.
//!
//! Explicit keywords always win. Without one, a large number implies the
//! Iraqi dinar: dinar totals run into the thousands or millions, dollar totals
//! rarely do.

use lazy_static::lazy_static;
use tracing::debug;

use super::digits::normalize_digits;
use super::patterns::MAGNITUDE_NUMBER;
use super::{ExtractionMatch, FieldExtractor};
use crate::error::{FawtaraError, Result};
use crate::models::config::CurrencyConfig;
use crate::models::invoice::Currency;

lazy_static! {
    static ref DEFAULT_DETECTOR: CurrencyDetector =
        CurrencyDetector::from_config(&CurrencyConfig::default()).unwrap();
}

/// Detect the invoice currency code ("USD" or "IQD").
pub fn detect_currency(text: &str) -> &'static str {
    DEFAULT_DETECTOR.detect(text).code()
}

/// Currency detector.
#[derive(Debug, Clone)]
pub struct CurrencyDetector {
    /// Upper-cased keywords per currency, in priority order.
    rules: Vec<(Currency, Vec<String>)>,
    magnitude_threshold: Option<f64>,
    magnitude_currency: Currency,
    default: Currency,
}

impl CurrencyDetector {
    pub fn from_config(config: &CurrencyConfig) -> Result<Self> {
        let rules = config
            .rules
            .iter()
            .map(|rule| {
                if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                    return Err(FawtaraError::Config(format!(
                        "empty keyword for currency {}",
                        rule.currency
                    )));
                }
                Ok((
                    rule.currency,
                    rule.keywords.iter().map(|k| k.to_uppercase()).collect(),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            magnitude_threshold: config.magnitude_threshold,
            magnitude_currency: config.magnitude_currency,
            default: config.default,
        })
    }

    /// Detect the currency, falling back to the configured default.
    pub fn detect(&self, text: &str) -> Currency {
        match self.extract(text) {
            Some(found) => found.value,
            None => {
                debug!("No currency signal, defaulting to {}", self.default);
                self.default
            }
        }
    }

    pub fn default_currency(&self) -> Currency {
        self.default
    }

    fn keyword_matches<'a>(
        &'a self,
        upper: &'a str,
    ) -> impl Iterator<Item = ExtractionMatch<Currency>> + 'a {
        self.rules.iter().flat_map(move |(currency, keywords)| {
            keywords
                .iter()
                .filter(move |k| upper.contains(k.as_str()))
                .map(move |k| ExtractionMatch::new(*currency, k.as_str()))
        })
    }

    fn magnitude_matches<'a>(
        &'a self,
        upper: &'a str,
    ) -> impl Iterator<Item = ExtractionMatch<Currency>> + 'a {
        let threshold = self.magnitude_threshold;
        MAGNITUDE_NUMBER
            .find_iter(upper)
            .filter(move |m| match threshold {
                Some(threshold) => m.as_str().parse::<f64>().is_ok_and(|v| v >= threshold),
                None => false,
            })
            .map(move |m| {
                ExtractionMatch::new(self.magnitude_currency, m.as_str())
                    .with_position(m.start(), m.end())
            })
    }
}

impl Default for CurrencyDetector {
    fn default() -> Self {
        DEFAULT_DETECTOR.clone()
    }
}

impl FieldExtractor for CurrencyDetector {
    type Output = ExtractionMatch<Currency>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let upper = normalize_digits(text).to_uppercase();

        if let Some(found) = self.keyword_matches(&upper).next() {
            debug!("Currency {} from keyword {:?}", found.value, found.source);
            return Some(found);
        }

        let found = self.magnitude_matches(&upper).next();
        if let Some(ref found) = found {
            debug!("Currency {} inferred from magnitude of {}", found.value, found.source);
        }
        found
    }

    /// Every currency signal in precedence order: keyword hits, then large numbers.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let upper = normalize_digits(text).to_uppercase();
        self.keyword_matches(&upper)
            .chain(self.magnitude_matches(&upper))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::CurrencyRule;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keyword_precedence() {
        assert_eq!(detect_currency("Total: 15000 IQD"), "IQD");
        assert_eq!(detect_currency("Paid in usd 20000"), "USD");
        assert_eq!(detect_currency("Total $ 25000"), "USD");
    }

    #[test]
    fn test_iqd_keywords_checked_first() {
        assert_eq!(detect_currency("25 USD = 32500 IQD"), "IQD");
    }

    #[test]
    fn test_arabic_keywords() {
        assert_eq!(detect_currency("المبلغ ٥٠ دولار"), "USD");
        assert_eq!(detect_currency("المبلغ ٥٠ دينار"), "IQD");
        assert_eq!(detect_currency("السعر ٧٥٠ د.ع"), "IQD");
    }

    #[test]
    fn test_magnitude_heuristic() {
        assert_eq!(detect_currency("Total: 15000"), "IQD");
        assert_eq!(detect_currency("المجموع ٢٥٠٠٠"), "IQD");
        assert_eq!(detect_currency("Total: 10000"), "IQD");
        assert_eq!(detect_currency("Total: 9999.99"), "USD");
    }

    #[test]
    fn test_persian_digits_are_not_magnitudes() {
        assert_eq!(detect_currency("Total ۱۲۰۰۰"), "USD");
        assert_eq!(detect_currency("Total ۱۲۰۰۰ or 12000"), "IQD");
    }

    #[test]
    fn test_default() {
        assert_eq!(detect_currency("Total: 50"), "USD");
        assert_eq!(detect_currency(""), "USD");
    }

    #[test]
    fn test_commas_split_numbers() {
        // Thousands commas are not stripped here, so 15,000 reads as 15 and 000
        assert_eq!(detect_currency("Total: 15,000"), "USD");
    }

    #[test]
    fn test_extract_all_signals() {
        let detector = CurrencyDetector::default();
        let signals = detector.extract_all("USD 12000");
        let values: Vec<(Currency, &str)> = signals
            .iter()
            .map(|m| (m.value, m.source.as_str()))
            .collect();
        assert_eq!(values, vec![(Currency::Usd, "USD"), (Currency::Iqd, "12000")]);
    }

    #[test]
    fn test_magnitude_disabled() {
        let config = CurrencyConfig {
            magnitude_threshold: None,
            ..CurrencyConfig::default()
        };
        let detector = CurrencyDetector::from_config(&config).unwrap();
        assert_eq!(detector.detect("Total: 15000"), Currency::Usd);
    }

    #[test]
    fn test_custom_vocabulary() {
        let config = CurrencyConfig {
            rules: vec![CurrencyRule::new(Currency::Iqd, &["dinar"])],
            magnitude_threshold: None,
            magnitude_currency: Currency::Iqd,
            default: Currency::Iqd,
        };
        let detector = CurrencyDetector::from_config(&config).unwrap();
        assert_eq!(detector.detect("500 Dinar"), Currency::Iqd);
        assert_eq!(detector.detect("500 USD"), Currency::Iqd);
        assert_eq!(detector.default_currency(), Currency::Iqd);
    }
}
