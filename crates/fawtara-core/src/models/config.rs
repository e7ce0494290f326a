//! Configuration structures for the extraction pipeline.
//!
//! Rule lists and vocabularies are plain data so new locales, date layouts or
//! keyword sets can be added without touching extraction code. Defaults
//! reproduce the built-in Arabic/English behavior.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::invoice::rules::patterns::{
    DATE_ARABIC_LABEL, DATE_DMY, DATE_MONTH_NAME, DATE_YMD,
};
use crate::models::invoice::{Category, Currency};

/// Main configuration for fawtara.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FawtaraConfig {
    /// Invoice extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Invoice extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Date rules and parse formats.
    pub dates: DateConfig,

    /// Total-amount keywords.
    pub amounts: AmountConfig,

    /// Currency vocabulary and magnitude heuristic.
    pub currency: CurrencyConfig,

    /// Category vocabulary.
    pub categories: CategoryConfig,
}

/// Ordered date rules; the first rule yielding a parseable date wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    /// Rules in priority order.
    pub rules: Vec<DateRule>,

    /// `chrono` formats tried, in order, on the cleaned match of a numeric rule.
    pub formats: Vec<String>,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                DateRule::numeric("year_month_day", DATE_YMD),
                DateRule::numeric("day_month_year", DATE_DMY),
                // Cleaned like every numeric match, so it never parses and
                // hands over to the next rule. Switch its kind to
                // `month_name` to read it as a date.
                DateRule::numeric("month_name", DATE_MONTH_NAME),
                DateRule::numeric("arabic_label", DATE_ARABIC_LABEL),
            ],
            formats: vec![
                "%Y-%m-%d".to_string(),
                "%d/%m/%Y".to_string(),
                "%d-%m-%Y".to_string(),
                "%Y/%m/%d".to_string(),
            ],
        }
    }
}

/// A single date rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRule {
    /// Rule name, used in logs and errors.
    pub name: String,

    /// Regular expression, matched case-insensitively.
    pub pattern: String,

    /// How a match is turned into a date.
    #[serde(default)]
    pub kind: DateRuleKind,
}

impl DateRule {
    pub fn numeric(name: &str, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            kind: DateRuleKind::Numeric,
        }
    }
}

/// How a date rule's match is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRuleKind {
    /// Strip the match to digits and `/`/`-`, then try each configured format.
    #[default]
    Numeric,
    /// Read the named groups `month` (English name), `day` and `year`.
    /// Opt-in; no default rule uses it.
    MonthName,
}

/// Keywords marking a line as carrying the invoice total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmountConfig {
    /// Matched against the upper-cased line.
    pub keywords: Vec<String>,
}

impl Default for AmountConfig {
    fn default() -> Self {
        Self {
            keywords: [
                "TOTAL",
                "AMOUNT",
                "GRAND TOTAL",
                "المجموع",
                "الإجمالي",
                "الاجمالي",
                "المبلغ",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
        }
    }
}

/// Currency vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    /// Keyword rules in priority order.
    pub rules: Vec<CurrencyRule>,

    /// Any number at or above this value selects `magnitude_currency`.
    /// `None` disables the magnitude heuristic.
    pub magnitude_threshold: Option<f64>,

    /// Currency implied by a large number.
    pub magnitude_currency: Currency,

    /// Currency when nothing else matches.
    pub default: Currency,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                CurrencyRule::new(Currency::Iqd, &["IQD", "دينار", "د.ع"]),
                CurrencyRule::new(Currency::Usd, &["USD", "$", "دولار"]),
            ],
            magnitude_threshold: Some(10_000.0),
            magnitude_currency: Currency::Iqd,
            default: Currency::Usd,
        }
    }
}

/// Keywords that identify one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRule {
    pub currency: Currency,
    /// Matched against the upper-cased text.
    pub keywords: Vec<String>,
}

impl CurrencyRule {
    pub fn new(currency: Currency, keywords: &[&str]) -> Self {
        Self {
            currency,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Category vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Keyword rules in priority order.
    pub rules: Vec<CategoryRule>,

    /// Category when no keyword matches.
    pub default: Category,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                CategoryRule::new(Category::Electricity, &["electric", "كهرباء"]),
                CategoryRule::new(Category::Internet, &["internet", "انترنت"]),
                CategoryRule::new(Category::Water, &["water", "ماء"]),
                CategoryRule::new(Category::Shopping, &["shop", "سوبر"]),
            ],
            default: Category::General,
        }
    }
}

/// Keywords that identify one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    /// Matched against the lower-cased text.
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl FawtaraConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
