//! Error types for the fawtara-core library.
//!
//! Extraction itself never fails; these errors come from building a pipeline
//! out of configuration and from loading or saving that configuration.

use thiserror::Error;

/// Main error type for the fawtara library.
#[derive(Error, Debug)]
pub enum FawtaraError {
    /// A configured date rule carries a pattern that does not compile.
    #[error("invalid pattern for date rule {rule}: {source}")]
    Pattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration is well-formed JSON but semantically unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON for the expected schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the fawtara library.
pub type Result<T> = std::result::Result<T, FawtaraError>;
