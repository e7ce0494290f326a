//! Extracted invoice record and its field enums.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel written in place of an invoice date that could not be extracted.
pub const DATE_NOT_FOUND: &str = "Not Found";

/// Structured fields extracted from one document's OCR text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Invoice date, or the "Not Found" sentinel.
    pub invoice_date: InvoiceDate,

    /// Best-guess monetary total (never negative).
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,

    /// Inferred currency.
    pub currency: Currency,

    /// Invoice category.
    pub category: Category,

    /// Script language of the source text.
    pub language: Language,
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self {
            invoice_date: InvoiceDate::NotFound,
            total_amount: Decimal::ZERO,
            currency: Currency::default(),
            category: Category::default(),
            language: Language::default(),
        }
    }
}

/// Full extraction report for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Extracted fields.
    pub result: ExtractionResult,

    /// OCR text the fields were extracted from.
    pub raw_text: String,

    /// One entry per field that fell back to its default.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Invoice date as extracted: either a calendar date or not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InvoiceDate {
    /// A date matched by one of the date rules.
    Found(NaiveDate),
    /// No rule produced a parseable date.
    #[default]
    NotFound,
}

impl InvoiceDate {
    /// Get the date, if one was found.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            InvoiceDate::Found(date) => Some(*date),
            InvoiceDate::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, InvoiceDate::Found(_))
    }
}

impl From<Option<NaiveDate>> for InvoiceDate {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(InvoiceDate::NotFound, InvoiceDate::Found)
    }
}

impl fmt::Display for InvoiceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceDate::Found(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            InvoiceDate::NotFound => f.write_str(DATE_NOT_FOUND),
        }
    }
}

impl FromStr for InvoiceDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == DATE_NOT_FOUND {
            return Ok(InvoiceDate::NotFound);
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(InvoiceDate::Found)
    }
}

impl Serialize for InvoiceDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InvoiceDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Invoice currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    /// US dollar.
    #[default]
    #[serde(rename = "USD")]
    Usd,
    /// Iraqi dinar.
    #[serde(rename = "IQD")]
    Iqd,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Iqd => "IQD",
        }
    }

    /// Parse an ISO 4217 code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::Usd),
            "IQD" => Some(Currency::Iqd),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Single-label invoice category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    Electricity,
    Internet,
    Water,
    Shopping,
    #[default]
    General,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electricity => "Electricity",
            Category::Internet => "Internet",
            Category::Water => "Water",
            Category::Shopping => "Shopping",
            Category::General => "General",
        }
    }

    /// Parse a category label (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "electricity" => Some(Category::Electricity),
            "internet" => Some(Category::Internet),
            "water" => Some(Category::Water),
            "shopping" => Some(Category::Shopping),
            "general" => Some(Category::General),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Script language of a document, used to pick output labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "ar")]
    Ar,
    #[default]
    #[serde(rename = "en")]
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Running totals of extracted amounts, split by currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CurrencyTotals {
    /// Sum of all USD totals.
    #[serde(with = "rust_decimal::serde::float")]
    pub usd: Decimal,

    /// Sum of all IQD totals.
    #[serde(with = "rust_decimal::serde::float")]
    pub iqd: Decimal,
}

impl CurrencyTotals {
    /// Sum the totals of several results.
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a ExtractionResult>,
    {
        let mut totals = Self::default();
        for result in results {
            totals.add(result);
        }
        totals
    }

    /// Add one result to its currency's total, saturating at `Decimal::MAX`.
    pub fn add(&mut self, result: &ExtractionResult) {
        let total = match result.currency {
            Currency::Usd => &mut self.usd,
            Currency::Iqd => &mut self.iqd,
        };
        *total = total.saturating_add(result.total_amount);
    }

    /// Get the total for a currency.
    pub fn total(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Usd => self.usd,
            Currency::Iqd => self.iqd,
        }
    }
}
