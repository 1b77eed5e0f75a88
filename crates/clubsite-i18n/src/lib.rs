//! Locale resolution support for the clubsite backend
//!
//! This crate provides the locale handling used by the content API:
//!
//! - Locale configuration loaded from the deployment config
//! - Resolution of requested locale tags against the configured set
//! - Locale detection from `Accept-Language` headers
//! - Request-scoped locale normalization for content API routes
//! - A locale switcher facade for listing and linking locales
//!
//! # Example
//!
//! ```rust
//! use clubsite_i18n::{resolve, LocaleConfig};
//!
//! let config = LocaleConfig::new(vec!["en".into(), "de-AT".into()], "en");
//! assert_eq!(resolve(Some("de"), &config), Some("de-AT"));
//! assert_eq!(resolve(None, &config), Some("en"));
//! assert_eq!(resolve(Some("fr"), &config), None);
//! ```

pub mod config;
pub mod detector;
pub mod error;
pub mod middleware;
pub mod resolver;
pub mod switcher;

pub use config::LocaleConfig;
pub use detector::detect_from_header;
pub use error::{I18nError, I18nResult};
pub use middleware::{LocaleDecision, LocaleResolution, ResolutionOptions};
pub use resolver::resolve;
pub use switcher::{LocaleInfo, LocaleSwitcher};

/// Reserved locale token meaning "return every localized variant".
///
/// It bypasses resolution entirely and must never be matched against the
/// configured locale set; downstream handlers recognize it themselves.
pub const ALL_LOCALES: &str = "all";
