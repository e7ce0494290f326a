//! Keyword-based invoice category classification.

use lazy_static::lazy_static;
use tracing::debug;

use super::{ExtractionMatch, FieldExtractor};
use crate::error::{FawtaraError, Result};
use crate::models::config::CategoryConfig;
use crate::models::invoice::Category;

lazy_static! {
    static ref DEFAULT_CLASSIFIER: CategoryClassifier =
        CategoryClassifier::from_config(&CategoryConfig::default()).unwrap();
}

/// Classify the invoice into a category label.
pub fn classify_category(text: &str) -> &'static str {
    DEFAULT_CLASSIFIER.classify(text).label()
}

/// Single-label category classifier: the first class with a keyword in the
/// text wins, no scoring.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    /// Lower-cased keywords per category, in priority order.
    rules: Vec<(Category, Vec<String>)>,
    default: Category,
}

impl CategoryClassifier {
    pub fn from_config(config: &CategoryConfig) -> Result<Self> {
        let rules = config
            .rules
            .iter()
            .map(|rule| {
                if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                    return Err(FawtaraError::Config(format!(
                        "empty keyword for category {}",
                        rule.category
                    )));
                }
                Ok((
                    rule.category,
                    rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            default: config.default,
        })
    }

    /// Classify text, falling back to the configured default category.
    pub fn classify(&self, text: &str) -> Category {
        self.extract(text).map(|m| m.value).unwrap_or(self.default)
    }

    pub fn default_category(&self) -> Category {
        self.default
    }

    fn first_keyword(&self, keywords: &[String], lower: &str) -> Option<String> {
        keywords.iter().find(|k| lower.contains(k.as_str())).cloned()
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        DEFAULT_CLASSIFIER.clone()
    }
}

impl FieldExtractor for CategoryClassifier {
    type Output = ExtractionMatch<Category>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let lower = text.to_lowercase();
        let found = self.rules.iter().find_map(|(category, keywords)| {
            self.first_keyword(keywords, &lower)
                .map(|keyword| ExtractionMatch::new(*category, keyword))
        });

        if let Some(ref found) = found {
            debug!("Category {} from keyword {:?}", found.value, found.source);
        }
        found
    }

    /// Every category with at least one keyword present, in priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .filter_map(|(category, keywords)| {
                self.first_keyword(keywords, &lower)
                    .map(|keyword| ExtractionMatch::new(*category, keyword))
            })
            .collect()
    }
}
