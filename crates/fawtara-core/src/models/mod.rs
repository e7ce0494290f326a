//! Data models for extracted invoices and pipeline configuration.

pub mod config;
pub mod invoice;
pub mod labels;

pub use config::{
    AmountConfig, CategoryConfig, CategoryRule, CurrencyConfig, DateConfig, DateRule,
    DateRuleKind, ExtractionConfig, FawtaraConfig,
};
pub use invoice::{
    Category, Currency, CurrencyTotals, Extraction, ExtractionResult, InvoiceDate, Language,
};
pub use labels::ExportLabels;
