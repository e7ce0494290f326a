//! Extraction pipeline over one document's OCR text.

use std::time::Instant;

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::invoice::{Extraction, ExtractionResult};

use super::rules::{
    script_language, AmountExtractor, CategoryClassifier, CurrencyDetector, DateExtractor,
    FieldExtractor,
};

lazy_static! {
    static ref DEFAULT_PIPELINE: InvoicePipeline = InvoicePipeline::default();
}

/// Extract all fields with the default pipeline.
pub fn extract_invoice(text: &str) -> ExtractionResult {
    DEFAULT_PIPELINE.extract(text)
}

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Extract the structured fields.
    fn extract(&self, text: &str) -> ExtractionResult;

    /// Extract the fields and report which ones fell back to defaults.
    fn parse(&self, text: &str) -> Extraction;
}

/// Runs every field extractor over the same text.
///
/// Extractors are independent: each normalizes digits on its own and none
/// sees another's output. The pipeline holds only compiled, immutable rules,
/// so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct InvoicePipeline {
    dates: DateExtractor,
    amounts: AmountExtractor,
    currency: CurrencyDetector,
    categories: CategoryClassifier,
}

impl InvoicePipeline {
    /// Create a pipeline with the built-in rules.
    pub fn new() -> Self {
        Self {
            dates: DateExtractor::default(),
            amounts: AmountExtractor::default(),
            currency: CurrencyDetector::default(),
            categories: CategoryClassifier::default(),
        }
    }

    /// Build a pipeline from configuration, compiling all rules up front.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            dates: DateExtractor::from_config(&config.dates)?,
            amounts: AmountExtractor::from_config(&config.amounts)?,
            currency: CurrencyDetector::from_config(&config.currency)?,
            categories: CategoryClassifier::from_config(&config.categories)?,
        })
    }
}

impl Default for InvoicePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for InvoicePipeline {
    fn extract(&self, text: &str) -> ExtractionResult {
        ExtractionResult {
            invoice_date: self.dates.extract_date(text),
            total_amount: self.amounts.extract_amount(text),
            currency: self.currency.detect(text),
            category: self.categories.classify(text),
            language: script_language(text),
        }
    }

    fn parse(&self, text: &str) -> Extraction {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing invoice from {} characters of text", text.chars().count());

        let invoice_date = self.dates.extract(text).map(|m| m.value);
        if invoice_date.is_none() {
            warnings.push("Could not extract invoice date".to_string());
        }

        let total_amount = match self.amounts.extract(text) {
            Some(m) => m.value,
            None => {
                warnings.push("Could not extract total amount, using 0".to_string());
                Decimal::ZERO
            }
        };

        let currency = match self.currency.extract(text) {
            Some(m) => m.value,
            None => {
                let currency = self.currency.default_currency();
                warnings.push(format!("No currency signal, defaulting to {}", currency));
                currency
            }
        };

        let category = match self.categories.extract(text) {
            Some(m) => m.value,
            None => {
                let category = self.categories.default_category();
                warnings.push(format!("No category keyword matched, defaulting to {}", category));
                category
            }
        };

        let result = ExtractionResult {
            invoice_date: invoice_date.into(),
            total_amount,
            currency,
            category,
            language: script_language(text),
        };

        debug!(
            "Extracted date {} amount {} {} in {:?}",
            result.invoice_date,
            result.total_amount,
            result.currency,
            start.elapsed()
        );

        Extraction {
            result,
            raw_text: text.to_string(),
            warnings,
        }
    }
}
