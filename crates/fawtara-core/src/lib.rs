//! Core library for bilingual invoice field extraction.
//!
//! This crate turns raw OCR text from Arabic/English invoices into structured
//! fields:
//! - Eastern Arabic-Indic digit normalization
//! - invoice date, total amount, currency, category and script language
//! - a pure extraction pipeline with data-driven rules and vocabularies

pub mod document;
pub mod error;
pub mod invoice;
pub mod models;

pub use document::assemble_pages;
pub use error::{FawtaraError, Result};
pub use invoice::rules::{
    classify_category, detect_currency, detect_language, extract_amount, extract_date,
    normalize_digits,
};
pub use invoice::{extract_invoice, FieldExtractor, InvoiceParser, InvoicePipeline};
pub use models::config::{ExtractionConfig, FawtaraConfig};
pub use models::invoice::{
    Category, Currency, CurrencyTotals, Extraction, ExtractionResult, InvoiceDate, Language,
};
