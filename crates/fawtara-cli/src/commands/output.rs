//! Rendering of extraction results as JSON, CSV or text.

use serde::Serialize;

use fawtara_core::{Extraction, ExtractionResult};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output with localized headers
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for per-file output.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// One processed document as written to output.
#[derive(Debug, Serialize)]
pub struct InvoiceRecord {
    pub filename: String,
    #[serde(flatten)]
    pub result: ExtractionResult,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

impl InvoiceRecord {
    pub fn new(filename: impl Into<String>, extraction: Extraction, include_text: bool) -> Self {
        Self {
            filename: filename.into(),
            result: extraction.result,
            status: "Processed",
            warnings: extraction.warnings,
            raw_text: include_text.then_some(extraction.raw_text),
        }
    }
}

pub fn format_record(record: &InvoiceRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

/// Localized one-row export; labels follow the script of the source text.
fn format_csv(record: &InvoiceRecord) -> anyhow::Result<String> {
    let language = record.result.language;
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(language.export_labels().headers())?;
    wtr.write_record([
        record.filename.as_str(),
        &record.result.invoice_date.to_string(),
        &record.result.total_amount.to_string(),
        language.currency_name(record.result.currency),
        record.result.category.label(),
        language.processed_status(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &InvoiceRecord) -> String {
    let language = record.result.language;
    let labels = language.export_labels();
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", labels.filename, record.filename));
    output.push_str(&format!("{}: {}\n", labels.invoice_date, record.result.invoice_date));
    output.push_str(&format!("{}: {}\n", labels.amount, record.result.total_amount));
    output.push_str(&format!(
        "{}: {}\n",
        labels.currency,
        language.currency_name(record.result.currency)
    ));
    output.push_str(&format!("{}: {}\n", labels.category, record.result.category));
    output.push_str(&format!("{}: {}\n", labels.status, language.processed_status()));

    if !record.warnings.is_empty() {
        output.push('\n');
        for warning in &record.warnings {
            output.push_str(&format!("! {}\n", warning));
        }
    }

    output
}
