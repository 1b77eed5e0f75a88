//! Error types for locale handling
//!
//! Resolution failures are deliberately not errors: an unresolvable locale
//! is `None` and a missing configuration degrades to defaults. Only faults
//! that genuinely cannot be represented in-band live here.

use thiserror::Error;

/// Errors that can occur during locale handling
#[derive(Error, Debug)]
pub enum I18nError {
    /// A URL could not be parsed while building a localized link
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
