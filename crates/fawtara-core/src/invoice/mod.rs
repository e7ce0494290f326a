//! Invoice field extraction module.

mod parser;
pub mod rules;

pub use parser::{extract_invoice, InvoiceParser, InvoicePipeline};
pub use rules::{ExtractionMatch, FieldExtractor};
