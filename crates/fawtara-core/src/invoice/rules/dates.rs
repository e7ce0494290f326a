//! Date extraction for bilingual invoices.
//!
//! Dates are found by an ordered list of rules. Each rule contributes at most
//! its first match; a match that parses under no format hands over to the next
//! rule. Day/month order in `03/04/2024` is decided purely by format order,
//! with no locale inference; the default formats read it day-first.
//! Numeric rules clean the match to digits, `/` and `-` before the format
//! trials, so the default month-name rule matches but never parses.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::{Captures, Regex, RegexBuilder};
use tracing::debug;

use super::digits::normalize_digits;
use super::{ExtractionMatch, FieldExtractor};
use crate::error::{FawtaraError, Result};
use crate::models::config::{DateConfig, DateRuleKind};
use crate::models::invoice::InvoiceDate;

lazy_static! {
    static ref DEFAULT_EXTRACTOR: DateExtractor =
        DateExtractor::from_config(&DateConfig::default()).unwrap();
}

/// Extract the invoice date as `YYYY-MM-DD`, or "Not Found".
pub fn extract_date(text: &str) -> String {
    DEFAULT_EXTRACTOR.extract_date(text).to_string()
}

/// Date field extractor.
#[derive(Debug, Clone)]
pub struct DateExtractor {
    rules: Vec<CompiledRule>,
    formats: Vec<String>,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    name: String,
    regex: Regex,
    kind: DateRuleKind,
}

impl DateExtractor {
    /// Compile the configured rules.
    pub fn from_config(config: &DateConfig) -> Result<Self> {
        let needs_formats = config.rules.iter().any(|r| r.kind == DateRuleKind::Numeric);
        if needs_formats && config.formats.is_empty() {
            return Err(FawtaraError::Config(
                "numeric date rules need at least one date format".to_string(),
            ));
        }

        let rules = config
            .rules
            .iter()
            .map(|rule| {
                let regex = RegexBuilder::new(&rule.pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| FawtaraError::Pattern {
                        rule: rule.name.clone(),
                        source,
                    })?;

                if rule.kind == DateRuleKind::MonthName {
                    for group in ["month", "day", "year"] {
                        if !regex.capture_names().flatten().any(|name| name == group) {
                            return Err(FawtaraError::Config(format!(
                                "date rule {} needs a named group `{}`",
                                rule.name, group
                            )));
                        }
                    }
                }

                Ok(CompiledRule {
                    name: rule.name.clone(),
                    regex,
                    kind: rule.kind,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            formats: config.formats.clone(),
        })
    }

    /// Extract the invoice date, falling back to the not-found sentinel.
    pub fn extract_date(&self, text: &str) -> InvoiceDate {
        self.extract(text).map(|m| m.value).into()
    }

    fn apply_rule(&self, rule: &CompiledRule, text: &str) -> Option<ExtractionMatch<NaiveDate>> {
        let caps = rule.regex.captures(text)?;
        let full_match = caps.get(0)?;

        let date = match rule.kind {
            DateRuleKind::Numeric => self.parse_numeric(full_match.as_str()),
            DateRuleKind::MonthName => parse_month_name(&caps),
        };

        match date {
            Some(date) => {
                debug!("Date rule {} matched {:?} as {}", rule.name, full_match.as_str(), date);
                Some(
                    ExtractionMatch::new(date, full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            }
            None => {
                debug!("Date rule {} matched {:?} but no format parsed it", rule.name, full_match.as_str());
                None
            }
        }
    }

    fn parse_numeric(&self, matched: &str) -> Option<NaiveDate> {
        let cleaned: String = matched
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '/' || *c == '-')
            .collect();

        self.formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        DEFAULT_EXTRACTOR.clone()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let text = normalize_digits(text);
        self.rules.iter().find_map(|rule| self.apply_rule(rule, &text))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let text = normalize_digits(text);
        self.rules
            .iter()
            .filter_map(|rule| self.apply_rule(rule, &text))
            .collect()
    }
}

fn parse_month_name(caps: &Captures<'_>) -> Option<NaiveDate> {
    let month = english_month_to_number(caps.name("month")?.as_str())?;
    let day: u32 = caps.name("day")?.as_str().parse().ok()?;
    let year: i32 = caps.name("year")?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn english_month_to_number(month: &str) -> Option<u32> {
    let prefix = month.chars().take(3).collect::<String>().to_lowercase();
    match prefix.as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}
